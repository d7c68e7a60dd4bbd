/// Data access for feed-service
///
/// The feed only reads: candidate posts with their engagement counters, and
/// viewer profiles. Both sit behind traits so the ranking path can be driven
/// by any store.
pub mod post_repo;
pub mod user_repo;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{Post, ViewerProfile};

pub use post_repo::PgPostStore;
pub use user_repo::PgViewerDirectory;

/// Source of feed candidates
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All visible posts with engagement counters filled in.
    async fn list_posts(&self) -> Result<Vec<Post>>;
}

/// Lookup of viewer profiles by verified user id
#[async_trait]
pub trait ViewerDirectory: Send + Sync {
    async fn find_viewer(&self, user_id: Uuid) -> Result<Option<ViewerProfile>>;
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool created"
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

pub async fn ping(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
