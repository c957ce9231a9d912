use std::marker::PhantomData;

use sea_orm::{DbConn, DbErr, EntityTrait, PaginatorTrait, PrimaryKeyTrait, SqlErr};

use posts_core::error::RepoError;

/// Generic SeaORM repository: a connection plus the lookups every entity shares.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) async fn fetch_by_id<ID>(&self, id: ID) -> Result<Option<E::Model>, RepoError>
    where
        ID: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).one(&self.db).await.map_err(repo_error)
    }

    pub(crate) async fn fetch_all(&self) -> Result<Vec<E::Model>, RepoError> {
        E::find().all(&self.db).await.map_err(repo_error)
    }

    pub(crate) async fn row_exists<ID>(&self, id: ID) -> Result<bool, RepoError>
    where
        ID: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        let count = E::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(repo_error)?;
        Ok(count > 0)
    }
}

/// Map a SeaORM error onto the repository error the domain understands.
pub(crate) fn repo_error(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}
