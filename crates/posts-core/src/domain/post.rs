use chrono::{DateTime, Utc};

use posts_shared::PostPayload;

use super::{PostDraft, TagSet};

/// Post entity - a blog post with its publication state and tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// Assigned by the store; `None` until the post is first saved.
    pub id: Option<i64>,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    /// Free text, not a reference to a user record.
    pub author: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: TagSet,
}

impl Post {
    /// Build an unsaved post from a draft. A draft marked published is stamped
    /// as published at `now`.
    pub fn create(draft: PostDraft, tags: TagSet, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            author: draft.author,
            published: draft.published,
            published_at: draft.published.then_some(now),
            created_at: now,
            updated_at: now,
            tags,
        }
    }

    /// Overwrite the editable fields from a draft.
    ///
    /// Tags are left alone (see [`Post::replace_tags`]) and so is `published_at`,
    /// which only [`Post::publish`] and [`Post::unpublish`] move.
    pub fn apply(&mut self, draft: PostDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.excerpt = draft.excerpt;
        self.content = draft.content;
        self.author = draft.author;
        self.published = draft.published;
        self.updated_at = now;
    }

    pub fn replace_tags(&mut self, tags: TagSet) {
        self.tags = tags;
    }

    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published = true;
        self.published_at = Some(now);
        self.updated_at = now;
    }

    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.published = false;
        self.published_at = None;
        self.updated_at = now;
    }
}

/// Projection of a post onto its wire form.
impl From<&Post> for PostPayload {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            published_at: post.published_at,
            is_published: post.published,
            created_at: Some(post.created_at),
            updated_at: Some(post.updated_at),
            tags: Some(post.tags.names()),
        }
    }
}
