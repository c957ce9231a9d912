use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Tag entity - a shared label attachable to many posts.
///
/// Names are unique across the store, compared case-sensitively after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The tags attached to a post, keyed by name.
///
/// Holding at most one tag per name keeps the uniqueness rule in the type
/// rather than leaving it to whoever builds the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeMap<String, Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag. Returns `false` if a tag with that name was already present,
    /// in which case the existing entry is kept.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.0.contains_key(&tag.name) {
            return false;
        }
        self.0.insert(tag.name.clone(), tag);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.values()
    }

    pub fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.0.values().map(|t| t.id).collect()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl IntoIterator for TagSet {
    type Item = Tag;
    type IntoIter = std::collections::btree_map::IntoValues<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}
