//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, LikeExpr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, LoaderTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use posts_core::domain::{Post, Tag};
use posts_core::error::RepoError;
use posts_core::ports::{BaseRepository, PostRepository, TagRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// SeaORM post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// SeaORM tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

impl PostgresPostRepository {
    /// Attach tags to post rows, keeping the row order.
    async fn with_tags(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        let tags = models
            .load_many_to_many(TagEntity, PostTagEntity, &self.db)
            .await
            .map_err(repo_error)?;

        Ok(models
            .into_iter()
            .zip(tags)
            .map(|(model, tags)| model.into_domain(tags))
            .collect())
    }

    async fn find_newest_first(&self, condition: Condition) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .filter(condition)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        self.with_tags(models).await
    }

    async fn unlink_tags(txn: &DatabaseTransaction, post_ids: Vec<i64>) -> Result<(), RepoError> {
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.is_in(post_ids))
            .exec(txn)
            .await
            .map_err(repo_error)?;
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for PostgresPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        match self.fetch_by_id(id).await? {
            Some(model) => Ok(self.with_tags(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let models = self.fetch_all().await?;
        self.with_tags(models).await
    }

    async fn exists(&self, id: i64) -> Result<bool, RepoError> {
        self.row_exists(id).await
    }

    /// Insert or update the post row and rewrite its tag links in one transaction.
    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(repo_error)?;

        let active = post::ActiveModel::from(&post);
        let model = match post.id {
            Some(_) => active.update(&txn).await,
            None => active.insert(&txn).await,
        }
        .map_err(repo_error)?;

        Self::unlink_tags(&txn, vec![model.id]).await?;
        if !post.tags.is_empty() {
            let links = post.tags.ids().into_iter().map(|tag_id| post_tag::ActiveModel {
                post_id: Set(model.id),
                tag_id: Set(tag_id),
            });
            PostTagEntity::insert_many(links)
                .exec_without_returning(&txn)
                .await
                .map_err(repo_error)?;
        }

        txn.commit().await.map_err(repo_error)?;
        tracing::debug!(post_id = model.id, tags = post.tags.len(), "Saved post");

        Ok(Post {
            id: Some(model.id),
            ..post
        })
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(repo_error)?;

        Self::unlink_tags(&txn, vec![id]).await?;
        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(repo_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(repo_error)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_author(&self, author: &str) -> Result<Vec<Post>, RepoError> {
        self.find_newest_first(Condition::all().add(post::Column::Author.eq(author)))
            .await
    }

    async fn find_published(&self) -> Result<Vec<Post>, RepoError> {
        self.find_newest_first(Condition::all().add(post::Column::IsPublished.eq(true)))
            .await
    }

    async fn find_by_tag(&self, tag_name: &str) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .inner_join(TagEntity)
            .filter(tag::Column::Name.eq(tag_name))
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        self.with_tags(models).await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Post>, RepoError> {
        let pattern = format!("%{}%", escape_like(keyword));
        let like = |column: post::Column| {
            Expr::col((PostEntity, column)).like(LikeExpr::new(pattern.clone()).escape('\\'))
        };

        self.find_newest_first(
            Condition::any()
                .add(like(post::Column::Title))
                .add(like(post::Column::Content))
                .add(like(post::Column::Author)),
        )
        .await
    }

    async fn find_tag_names(&self) -> Result<Vec<String>, RepoError> {
        TagEntity::find()
            .select_only()
            .column(tag::Column::Name)
            .distinct()
            .inner_join(PostEntity)
            .order_by_asc(tag::Column::Name)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(repo_error)
    }

    async fn delete_all(&self, posts: &[Post]) -> Result<u64, RepoError> {
        let ids: Vec<i64> = posts.iter().filter_map(|p| p.id).collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await.map_err(repo_error)?;
        Self::unlink_tags(&txn, ids.clone()).await?;
        let result = PostEntity::delete_many()
            .filter(post::Column::Id.is_in(ids))
            .exec(&txn)
            .await
            .map_err(repo_error)?;
        txn.commit().await.map_err(repo_error)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    /// `INSERT .. ON CONFLICT (name) DO NOTHING`, then read back whichever row won.
    async fn get_or_create(&self, name: &str, now: DateTime<Utc>) -> Result<Tag, RepoError> {
        let candidate = tag::ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let inserted = TagEntity::insert(candidate)
            .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
            .map_err(repo_error)?;
        if inserted > 0 {
            tracing::debug!(tag = name, "Created tag");
        }

        self.find_by_name(name).await?.ok_or(RepoError::NotFound)
    }
}

/// Make `%`, `_` and the escape character itself literal inside a LIKE pattern.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
