//! # Posts Infrastructure
//!
//! Concrete implementations of the ports defined in `posts-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - SeaORM-backed repositories and connection pool
//! - `minimal` - No external dependencies, in-memory store only

pub mod database;
pub mod memory;

// Re-exports - In-Memory
pub use memory::InMemoryStore;

// Re-exports - Database
pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::{DatabasePool, PostgresPostRepository, PostgresTagRepository};
