//! In-memory post and tag store over an async RwLock.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use posts_core::domain::{Post, Tag};
use posts_core::error::RepoError;
use posts_core::ports::{BaseRepository, PostRepository, TagRepository};

#[derive(Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    tags: BTreeMap<i64, Tag>,
    last_post_id: i64,
    last_tag_id: i64,
}

/// Posts and tags held in process memory.
///
/// Implements both repository ports so a single instance can back the service.
/// Keyword search is a case-sensitive substring match.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, predicate: F) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
    {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect();
        posts.sort_by_key(|p| Reverse((p.created_at, p.id)));
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.values().cloned().collect())
    }

    async fn exists(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.tables.read().await.posts.contains_key(&id))
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        if let Some(tag) = post.tags.iter().find(|t| !tables.tags.contains_key(&t.id)) {
            return Err(RepoError::Constraint(format!(
                "tag '{}' is not stored",
                tag.name
            )));
        }

        let id = match post.id {
            Some(id) if tables.posts.contains_key(&id) => id,
            Some(_) => return Err(RepoError::NotFound),
            None => {
                tables.last_post_id += 1;
                tables.last_post_id
            }
        };
        post.id = Some(id);
        tables.posts.insert(id, post.clone());

        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.tables.write().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_author(&self, author: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self.select(|p| p.author == author).await)
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.select(|p| p.published).await)
    }

    async fn find_by_tag(&self, tag_name: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self.select(|p| p.tags.contains(tag_name)).await)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .select(|p| {
                p.title.contains(keyword) || p.content.contains(keyword) || p.author.contains(keyword)
            })
            .await)
    }

    async fn find_tag_names(&self) -> Result<Vec<String>, RepoError> {
        let tables = self.tables.read().await;
        let names: BTreeSet<String> = tables
            .posts
            .values()
            .flat_map(|p| p.tags.names())
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn delete_all(&self, posts: &[Post]) -> Result<u64, RepoError> {
        let mut tables = self.tables.write().await;
        let removed = posts
            .iter()
            .filter_map(|p| p.id)
            .filter(|id| tables.posts.remove(id).is_some())
            .count();
        Ok(removed as u64)
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|t| t.name == name).cloned())
    }

    async fn get_or_create(&self, name: &str, now: DateTime<Utc>) -> Result<Tag, RepoError> {
        // Lookup and insert under one write lock.
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.tags.values().find(|t| t.name == name) {
            return Ok(existing.clone());
        }

        tables.last_tag_id += 1;
        let tag = Tag {
            id: tables.last_tag_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.tags.insert(tag.id, tag.clone());
        tracing::debug!(tag_id = tag.id, tag = name, "Created tag");

        Ok(tag)
    }
}
