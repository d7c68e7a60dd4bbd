use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::db::{PostStore, ViewerDirectory};
use crate::error::Result;
use crate::metrics::feed::{
    FEED_CANDIDATE_COUNT, FEED_REQUEST_DURATION_SECONDS, FEED_REQUEST_TOTAL,
    FEED_VIEWER_FALLBACK_TOTAL,
};
use crate::models::{RankedPost, RankingMode, ViewerContext};
use crate::services::ranking::FeedRanker;

/// Offset/limit window into the ranked feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: limit.max(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedPage {
    pub posts: Vec<RankedPost>,
    pub has_more: bool,
    pub total_count: usize,
    pub ranking: RankingMode,
}

/// Assembles a viewer's feed: loads candidates, resolves the viewer and ranks.
pub struct FeedService {
    posts: Arc<dyn PostStore>,
    viewers: Arc<dyn ViewerDirectory>,
    ranker: FeedRanker,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        viewers: Arc<dyn ViewerDirectory>,
        ranker: FeedRanker,
    ) -> Self {
        Self {
            posts,
            viewers,
            ranker,
        }
    }

    pub fn ranker(&self) -> &FeedRanker {
        &self.ranker
    }

    /// Build one page of the feed.
    ///
    /// `viewer_id` must already be authenticated. A viewer that cannot be
    /// resolved degrades to recency ordering instead of failing the request.
    pub async fn get_feed(
        &self,
        viewer_id: Option<Uuid>,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<FeedPage> {
        let start = Instant::now();

        let candidates = self.posts.list_posts().await?;

        let viewer = match viewer_id {
            Some(user_id) => self.resolve_viewer(user_id).await,
            None => None,
        };
        let ranking = if viewer.is_some() {
            RankingMode::Personalized
        } else {
            RankingMode::Recency
        };

        let ranked = self.ranker.rank(candidates, viewer.as_ref(), now);
        let total_count = ranked.len();

        let start_index = page.offset.min(total_count);
        let end = start_index.saturating_add(page.limit).min(total_count);
        let has_more = end < total_count;
        let posts: Vec<RankedPost> = ranked
            .into_iter()
            .skip(start_index)
            .take(end - start_index)
            .collect();

        let label = ranking.as_str();
        FEED_REQUEST_DURATION_SECONDS
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());
        FEED_REQUEST_TOTAL.with_label_values(&[label]).inc();
        FEED_CANDIDATE_COUNT
            .with_label_values(&[label])
            .observe(total_count as f64);

        debug!(
            viewer_id = ?viewer_id,
            ranking = label,
            total_count,
            offset = page.offset,
            returned = posts.len(),
            "Feed page assembled"
        );

        Ok(FeedPage {
            posts,
            has_more,
            total_count,
            ranking,
        })
    }

    async fn resolve_viewer(&self, user_id: Uuid) -> Option<ViewerContext> {
        match self.viewers.find_viewer(user_id).await {
            Ok(Some(profile)) => Some(ViewerContext::from(profile)),
            Ok(None) => {
                warn!(
                    viewer_id = %user_id,
                    "Viewer profile not found, falling back to recency feed"
                );
                FEED_VIEWER_FALLBACK_TOTAL
                    .with_label_values(&["not_found"])
                    .inc();
                None
            }
            Err(e) => {
                warn!(
                    viewer_id = %user_id,
                    error = %e,
                    "Viewer lookup failed, falling back to recency feed"
                );
                FEED_VIEWER_FALLBACK_TOTAL
                    .with_label_values(&["lookup_error"])
                    .inc();
                None
            }
        }
    }
}
