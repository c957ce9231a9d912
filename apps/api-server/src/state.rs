//! Application state - shared across all handlers.

use std::sync::Arc;

use posts_core::PostService;
use posts_infra::InMemoryStore;

#[cfg(feature = "postgres")]
use posts_infra::{DatabasePool, PostgresPostRepository, PostgresTagRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    #[cfg(feature = "postgres")]
    pub db: Option<DatabasePool>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Without a configured database the posts live in memory. A configured
    /// database that cannot be reached is a startup error.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            let pool = DatabasePool::init(db_config).await?;

            if config.auto_migrate {
                use migration::MigratorTrait;

                tracing::info!("Applying pending migrations");
                migration::Migrator::up(&pool.conn, None).await?;
            }

            let posts = PostService::new(
                Arc::new(PostgresPostRepository::new(pool.conn.clone())),
                Arc::new(PostgresTagRepository::new(pool.conn.clone())),
            );
            tracing::info!("Application state initialized (database)");

            return Ok(Self {
                posts,
                db: Some(pool),
            });
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }

        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        Ok(Self::in_memory())
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            posts: PostService::new(store.clone(), store),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}
