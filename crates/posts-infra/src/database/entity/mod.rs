//! SeaORM entities for the posts schema.

pub mod post;
pub mod post_tag;
pub mod tag;
