use std::sync::Arc;

use chrono::{DateTime, Utc};

use posts_shared::PostPayload;

use crate::domain::{Post, PostDraft, TagSet, normalize_tag_names};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, TagRepository};

/// Post use cases: maps payloads to domain posts, resolves tag names and
/// delegates storage to the repositories.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { posts, tags }
    }

    pub async fn create(&self, payload: PostPayload) -> Result<PostPayload, DomainError> {
        tracing::info!(title = %payload.title, "Creating post");

        let now = Utc::now();
        let mut draft = PostDraft::from(payload);
        let tags = match draft.tags.take() {
            Some(names) => self.resolve_tags(&names, now).await?,
            None => TagSet::new(),
        };

        let saved = self.posts.save(Post::create(draft, tags, now)).await?;
        tracing::debug!(id = ?saved.id, "Created post");

        Ok(PostPayload::from(&saved))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<PostPayload, DomainError> {
        tracing::info!(id, "Fetching post");
        let post = self.load(id).await?;
        Ok(PostPayload::from(&post))
    }

    pub async fn get_all(&self) -> Result<Vec<PostPayload>, DomainError> {
        tracing::info!("Fetching all posts");
        let posts = self.posts.find_all().await?;
        tracing::debug!(count = posts.len(), "Fetched posts");
        Ok(to_payloads(&posts))
    }

    pub async fn get_by_author(&self, author: &str) -> Result<Vec<PostPayload>, DomainError> {
        tracing::info!(author, "Fetching posts by author");
        let posts = self.posts.find_by_author(author).await?;
        tracing::debug!(count = posts.len(), author, "Fetched posts by author");
        Ok(to_payloads(&posts))
    }

    pub async fn get_published(&self) -> Result<Vec<PostPayload>, DomainError> {
        tracing::info!("Fetching published posts");
        let posts = self.posts.find_published().await?;
        tracing::debug!(count = posts.len(), "Fetched published posts");
        Ok(to_payloads(&posts))
    }

    pub async fn get_by_tag(&self, tag_name: &str) -> Result<Vec<PostPayload>, DomainError> {
        tracing::info!(tag = tag_name, "Fetching posts with tag");
        let posts = self.posts.find_by_tag(tag_name).await?;
        tracing::debug!(count = posts.len(), tag = tag_name, "Fetched posts with tag");
        Ok(to_payloads(&posts))
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<PostPayload>, DomainError> {
        tracing::info!(keyword, "Searching posts");
        let posts = self.posts.search(keyword).await?;
        tracing::debug!(count = posts.len(), keyword, "Search finished");
        Ok(to_payloads(&posts))
    }

    pub async fn get_all_tag_names(&self) -> Result<Vec<String>, DomainError> {
        tracing::info!("Fetching all tag names");
        Ok(self.posts.find_tag_names().await?)
    }

    /// Overwrite a post's editable fields. A `None` tag list keeps the current tags;
    /// any list, even an empty one, replaces them.
    pub async fn update(&self, id: i64, payload: PostPayload) -> Result<PostPayload, DomainError> {
        tracing::info!(id, "Updating post");

        let mut post = self.load(id).await?;
        let now = Utc::now();
        let mut draft = PostDraft::from(payload);

        if let Some(names) = draft.tags.take() {
            post.replace_tags(self.resolve_tags(&names, now).await?);
        }
        post.apply(draft, now);

        let updated = self.save_existing(id, post).await?;
        tracing::debug!(id, "Updated post");

        Ok(PostPayload::from(&updated))
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        tracing::info!(id, "Deleting post");

        if !self.posts.exists(id).await? {
            tracing::warn!(id, "Cannot delete, post not found");
            return Err(DomainError::post_not_found(id));
        }

        match self.posts.delete(id).await {
            Ok(()) => {}
            // Removed between the existence check and the delete.
            Err(RepoError::NotFound) => return Err(DomainError::post_not_found(id)),
            Err(e) => return Err(e.into()),
        }
        tracing::debug!(id, "Deleted post");
        Ok(())
    }

    /// Remove every post by `author`. Zero matches is not an error.
    pub async fn delete_by_author(&self, author: &str) -> Result<u64, DomainError> {
        tracing::warn!(author, "Deleting all posts by author");

        let posts = self.posts.find_by_author(author).await?;
        let deleted = if posts.is_empty() {
            0
        } else {
            self.posts.delete_all(&posts).await?
        };

        tracing::debug!(deleted, author, "Deleted posts by author");
        Ok(deleted)
    }

    pub async fn publish(&self, id: i64) -> Result<PostPayload, DomainError> {
        tracing::info!(id, "Publishing post");

        let mut post = self.load(id).await?;
        post.publish(Utc::now());
        let published = self.save_existing(id, post).await?;
        tracing::debug!(id, "Published post");

        Ok(PostPayload::from(&published))
    }

    pub async fn unpublish(&self, id: i64) -> Result<PostPayload, DomainError> {
        tracing::info!(id, "Unpublishing post");

        let mut post = self.load(id).await?;
        post.unpublish(Utc::now());
        let unpublished = self.save_existing(id, post).await?;
        tracing::debug!(id, "Unpublished post");

        Ok(PostPayload::from(&unpublished))
    }

    async fn load(&self, id: i64) -> Result<Post, DomainError> {
        self.posts.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(id, "Post not found");
            DomainError::post_not_found(id)
        })
    }

    async fn save_existing(&self, id: i64, post: Post) -> Result<Post, DomainError> {
        self.posts.save(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })
    }

    async fn resolve_tags(&self, names: &[String], now: DateTime<Utc>) -> Result<TagSet, DomainError> {
        let mut set = TagSet::new();
        for name in normalize_tag_names(names) {
            tracing::debug!(tag = %name, "Resolving tag");
            set.insert(self.tags.get_or_create(&name, now).await?);
        }
        Ok(set)
    }
}

fn to_payloads(posts: &[Post]) -> Vec<PostPayload> {
    posts.iter().map(PostPayload::from).collect()
}
