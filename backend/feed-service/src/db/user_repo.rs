use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::ViewerDirectory;
use crate::error::Result;
use crate::models::ViewerProfile;

#[derive(Debug, sqlx::FromRow)]
struct ViewerRow {
    id: Uuid,
    skills: Option<Vec<String>>,
    interests: Option<Vec<String>>,
}

/// PostgreSQL-backed viewer profile lookup
#[derive(Clone)]
pub struct PgViewerDirectory {
    pool: PgPool,
}

impl PgViewerDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewerDirectory for PgViewerDirectory {
    async fn find_viewer(&self, user_id: Uuid) -> Result<Option<ViewerProfile>> {
        let row = sqlx::query_as::<_, ViewerRow>(
            "SELECT id, skills, interests FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ViewerProfile {
            user_id: row.id,
            skills: row.skills.unwrap_or_default(),
            interests: row.interests.unwrap_or_default(),
        }))
    }
}
