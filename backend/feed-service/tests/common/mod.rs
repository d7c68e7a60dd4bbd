//! In-memory stores for feed integration tests
//!
//! Stand in for the PostgreSQL repositories so the HTTP surface can be
//! exercised without a database.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use feed_service::db::{PostStore, ViewerDirectory};
use feed_service::middleware::Claims;
use feed_service::models::{EngagementCounts, Post, ViewerProfile};
use feed_service::{AppError, Result};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Mock post store returning a fixed candidate set
#[derive(Clone, Default)]
pub struct MockPostStore {
    posts: Arc<Mutex<Vec<Post>>>,
    fail: bool,
}

impl MockPostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(Mutex::new(posts)),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            posts: Arc::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl PostStore for MockPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        if self.fail {
            return Err(AppError::Database("connection refused".into()));
        }
        Ok(self.posts.lock().unwrap().clone())
    }
}

/// Mock viewer directory; `broken` simulates a lookup outage
#[derive(Clone, Default)]
pub struct MockViewerDirectory {
    viewers: Arc<Mutex<HashMap<Uuid, ViewerProfile>>>,
    broken: bool,
    lookup_count: Arc<Mutex<usize>>,
}

impl MockViewerDirectory {
    pub fn new(viewers: Vec<ViewerProfile>) -> Self {
        Self {
            viewers: Arc::new(Mutex::new(
                viewers.into_iter().map(|v| (v.user_id, v)).collect(),
            )),
            broken: false,
            lookup_count: Arc::default(),
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn lookup_count(&self) -> usize {
        *self.lookup_count.lock().unwrap()
    }
}

#[async_trait]
impl ViewerDirectory for MockViewerDirectory {
    async fn find_viewer(&self, user_id: Uuid) -> Result<Option<ViewerProfile>> {
        {
            let mut count = self.lookup_count.lock().unwrap();
            *count += 1;
        }

        if self.broken {
            return Err(AppError::Database("user lookup timed out".into()));
        }
        Ok(self.viewers.lock().unwrap().get(&user_id).cloned())
    }
}

pub fn post(
    skills: &[&str],
    technologies: &[&str],
    category: Option<&str>,
    engagement: EngagementCounts,
    created_at: DateTime<Utc>,
) -> Post {
    Post {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        content: "Looking for collaborators".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        technologies: technologies.iter().map(|s| s.to_string()).collect(),
        category: category.map(str::to_string),
        engagement,
        created_at,
    }
}

pub fn engagement(views: u64, likes: u64, saves: u64) -> EngagementCounts {
    EngagementCounts {
        views,
        likes,
        saves,
        follows: 0,
    }
}

pub fn viewer(skills: &[&str], interests: &[&str]) -> ViewerProfile {
    ViewerProfile {
        user_id: Uuid::new_v4(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn bearer_token(user_id: Uuid) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("encode test token");
    format!("Bearer {}", token)
}
