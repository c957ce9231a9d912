//! In-memory store - used when no database is configured.

mod store;

pub use store::InMemoryStore;
