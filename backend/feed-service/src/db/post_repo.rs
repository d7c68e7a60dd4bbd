use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::PostStore;
use crate::error::Result;
use crate::models::{EngagementCounts, Post};

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    author_id: Uuid,
    content: String,
    skills: Option<Vec<String>>,
    technologies: Option<Vec<String>>,
    category: Option<String>,
    created_at: DateTime<Utc>,
    views: i64,
    likes: i64,
    saves: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author_id: row.author_id,
            content: row.content,
            skills: row.skills.unwrap_or_default(),
            technologies: row.technologies.unwrap_or_default(),
            category: row.category.filter(|c| !c.trim().is_empty()),
            engagement: EngagementCounts {
                views: count(row.views),
                likes: count(row.likes),
                saves: count(row.saves),
                follows: 0,
            },
            created_at: row.created_at,
        }
    }
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// PostgreSQL-backed candidate source
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.author_id, p.content, p.skills, p.technologies, p.category,
                   p.created_at,
                   (SELECT COUNT(*) FROM post_views v WHERE v.post_id = p.id) AS views,
                   (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS likes,
                   (SELECT COUNT(*) FROM post_saves s WHERE s.post_id = p.id) AS saves
            FROM posts p
            WHERE p.deleted_at IS NULL
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(post_count = rows.len(), "Loaded feed candidates");

        Ok(rows.into_iter().map(Post::from).collect())
    }
}
