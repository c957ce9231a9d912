//! Applies, rolls back or inspects the posts schema.
//!
//! `DATABASE_URL` selects the target database; `RUST_LOG` overrides the
//! default log filter.

use sea_orm_migration::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,sea_orm_migration=info,sqlx=warn";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    cli::run_cli(migration::Migrator).await;
}
