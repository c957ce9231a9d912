//! Post entity for SeaORM.

use sea_orm::ActiveValue;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use posts_core::domain::{Post, Tag, TagSet};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    pub is_published: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_tag::Entity")]
    PostTag,
}

impl Related<super::post_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostTag.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_tag::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_tag::Relation::Post.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain post from its row and the tag rows linked to it.
    pub fn into_domain(self, tags: Vec<super::tag::Model>) -> Post {
        Post {
            id: Some(self.id),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author,
            published: self.is_published,
            published_at: self.published_at.map(Into::into),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
            tags: tags.into_iter().map(Tag::from).collect::<TagSet>(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel. An unsaved post leaves
/// the id for the database to assign.
impl From<&Post> for ActiveModel {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            title: Set(post.title.clone()),
            excerpt: Set(post.excerpt.clone()),
            content: Set(post.content.clone()),
            author: Set(post.author.clone()),
            is_published: Set(post.published),
            published_at: Set(post.published_at.map(Into::into)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
