use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Post, Tag};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Every stored entity, in store order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    async fn exists(&self, id: ID) -> Result<bool, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] if nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository with the derived queries the service needs.
///
/// Every list query except `find_all` returns posts newest first by `created_at`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    async fn find_by_author(&self, author: &str) -> Result<Vec<Post>, RepoError>;

    async fn find_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts carrying a tag with exactly this name.
    async fn find_by_tag(&self, tag_name: &str) -> Result<Vec<Post>, RepoError>;

    /// Posts whose title, content or author contains `keyword`.
    async fn search(&self, keyword: &str) -> Result<Vec<Post>, RepoError>;

    /// Distinct names of tags attached to at least one post.
    async fn find_tag_names(&self) -> Result<Vec<String>, RepoError>;

    /// Remove the given posts, returning how many rows went away.
    async fn delete_all(&self, posts: &[Post]) -> Result<u64, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    /// Return the tag named `name`, creating it stamped with `now` if absent.
    ///
    /// Must be atomic: concurrent callers with the same name all get the same record.
    async fn get_or_create(&self, name: &str, now: DateTime<Utc>) -> Result<Tag, RepoError>;
}
