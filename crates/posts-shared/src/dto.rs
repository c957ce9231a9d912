//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as it travels over the wire.
///
/// The same shape is used for request bodies and responses. On input the
/// server-assigned fields (`id`, `publishedAt`, `createdAt`, `updatedAt`) are
/// ignored. A missing or `null` `tags` list on update leaves the stored tags alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "isPublished", alias = "published")]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}
