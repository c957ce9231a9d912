//! Application services - orchestrate the ports on behalf of the HTTP layer.

mod post_service;

pub use post_service::PostService;
