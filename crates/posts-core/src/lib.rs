//! # Posts Core
//!
//! The domain layer of the posts service: entities, the repository ports
//! they are stored through, and the [`PostService`] that orchestrates them.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError};
pub use service::PostService;
