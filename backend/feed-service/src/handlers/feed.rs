use actix_web::{web, HttpResponse};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::middleware::MaybeViewer;
use crate::models::FeedResponse;
use crate::services::{FeedService, PageRequest};

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl FeedQueryParams {
    /// Cursor is the base64-encoded decimal offset of the next page.
    pub(crate) fn decode_cursor(&self) -> Result<usize> {
        match &self.cursor {
            Some(cursor) if !cursor.is_empty() => {
                let decoded = general_purpose::STANDARD
                    .decode(cursor)
                    .map_err(|_| AppError::BadRequest("Invalid cursor format".to_string()))?;

                let offset_str = String::from_utf8(decoded)
                    .map_err(|_| AppError::BadRequest("Invalid cursor encoding".to_string()))?;

                offset_str
                    .parse::<usize>()
                    .map_err(|_| AppError::BadRequest("Invalid cursor value".to_string()))
            }
            _ => Ok(0),
        }
    }

    pub(crate) fn encode_cursor(offset: usize) -> String {
        general_purpose::STANDARD.encode(offset.to_string())
    }
}

pub struct FeedHandlerState {
    pub feed: Arc<FeedService>,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

/// Ranked post feed.
///
/// Authenticated viewers get the hybrid content/interaction ranking;
/// everyone else gets newest-first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "feed",
    params(
        ("limit" = Option<u32>, Query, description = "Page size, clamped to the configured maximum"),
        ("cursor" = Option<String>, Query, description = "Opaque cursor from a previous page"),
    ),
    responses(
        (status = 200, description = "Ranked feed page", body = FeedResponse),
        (status = 400, description = "Invalid cursor"),
        (status = 401, description = "Invalid bearer token"),
        (status = 500, description = "Post store unavailable"),
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_feed(
    query: web::Query<FeedQueryParams>,
    viewer: MaybeViewer,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let viewer_id = viewer.0.map(|v| v.0);
    let offset = query.decode_cursor()?;
    let max_page_size = state.max_page_size.max(1);
    let limit = query
        .limit
        .unwrap_or(state.default_page_size)
        .clamp(1, max_page_size) as usize;

    debug!(
        viewer_id = ?viewer_id,
        limit,
        offset,
        "Feed request"
    );

    let page = state
        .feed
        .get_feed(viewer_id, PageRequest::new(offset, limit), Utc::now())
        .await?;

    let cursor = if page.has_more && !page.posts.is_empty() {
        Some(FeedQueryParams::encode_cursor(offset + page.posts.len()))
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(FeedResponse {
        posts: page.posts,
        cursor,
        has_more: page.has_more,
        total_count: page.total_count,
        ranking: page.ranking,
    }))
}
