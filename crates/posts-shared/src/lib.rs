//! # Posts Shared
//!
//! Wire types exchanged over the HTTP API.
//! Kept free of domain and persistence concerns so clients can depend on it directly.

pub mod dto;
pub mod response;

pub use dto::PostPayload;
pub use response::ErrorResponse;
