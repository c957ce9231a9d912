//! Domain entities - the core business objects.

mod draft;
mod post;
mod tag;

pub use draft::{PostDraft, normalize_tag_names};
pub use post::Post;
pub use tag::{Tag, TagSet};
