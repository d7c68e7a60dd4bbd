// ============================================
// Feed Ranker
// ============================================
//
// Hybrid per-viewer ranking:
//   base  = content_similarity * W_content + interaction_score
//   final = base / (1 + days_old * decay_rate)
//
// Without a viewer, posts are ordered by creation time only.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::debug;

use super::content_similarity::similarity;
use super::interaction::{interaction_score, InteractionWeights};
use crate::config::FeedConfig;
use crate::models::{Post, RankedPost, ScoreRecord, ViewerContext};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Weights for the hybrid feed score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingWeights {
    /// Multiplier applied to content similarity so topical relevance
    /// dominates raw popularity
    pub content_similarity: f64,
    /// Fraction of the base score shed per day of age
    pub decay_rate_per_day: f64,
    pub interaction: InteractionWeights,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            content_similarity: 10.0,
            decay_rate_per_day: 0.1,
            interaction: InteractionWeights::feed(),
        }
    }
}

impl From<&FeedConfig> for RankingWeights {
    fn from(config: &FeedConfig) -> Self {
        Self {
            content_similarity: config.content_similarity_weight,
            decay_rate_per_day: config.decay_rate_per_day,
            interaction: InteractionWeights::feed()
                .with_views(config.view_weight)
                .with_likes(config.like_weight)
                .with_saves(config.save_weight),
        }
    }
}

/// Smooth time decay; `days_old` of zero leaves the score untouched.
pub fn decay(base_score: f64, days_old: f64, rate_per_day: f64) -> f64 {
    base_score / (1.0 + days_old * rate_per_day)
}

/// Fractional age in days, never negative.
pub fn days_old(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - created_at).num_milliseconds();
    (millis as f64 / MILLIS_PER_DAY).max(0.0)
}

/// Stateless ranker; every call builds its scores from scratch.
#[derive(Debug, Clone, Default)]
pub struct FeedRanker {
    weights: RankingWeights,
}

impl FeedRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: RankingWeights) -> Self {
        // Author-follower boost is not defined for posts
        let weights = RankingWeights {
            interaction: weights.interaction.with_follows(0.0),
            ..weights
        };
        Self { weights }
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    /// Score a single post for a viewer.
    pub fn score(&self, post: &Post, viewer: &ViewerContext, now: DateTime<Utc>) -> ScoreRecord {
        let item_tokens = post.content_tokens();
        let content_similarity = similarity(viewer.tokens(), item_tokens.as_slice());
        let interaction_score =
            interaction_score(Some(&post.engagement), &self.weights.interaction);

        let base_score = content_similarity * self.weights.content_similarity + interaction_score;
        let days_old = days_old(post.created_at, now);
        let final_score = decay(base_score, days_old, self.weights.decay_rate_per_day);

        ScoreRecord {
            content_similarity,
            interaction_score,
            base_score,
            days_old,
            final_score,
        }
    }

    /// Rank candidates for an optional viewer.
    ///
    /// Ties keep their input order.
    pub fn rank(
        &self,
        posts: Vec<Post>,
        viewer: Option<&ViewerContext>,
        now: DateTime<Utc>,
    ) -> Vec<RankedPost> {
        let Some(viewer) = viewer else {
            return Self::rank_by_recency(posts);
        };

        let mut ranked: Vec<RankedPost> = posts
            .into_iter()
            .map(|post| {
                let score = self.score(&post, viewer, now);
                RankedPost {
                    post,
                    score: Some(score),
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            let (a_score, b_score) = (a.final_score(), b.final_score());
            b_score.partial_cmp(&a_score).unwrap_or(Ordering::Equal)
        });

        debug!(
            viewer_id = %viewer.viewer_id,
            candidate_count = ranked.len(),
            top_score = ranked.first().and_then(RankedPost::final_score),
            "Personalized ranking complete"
        );

        ranked
    }

    /// Newest first, no scores attached.
    pub fn rank_by_recency(mut posts: Vec<Post>) -> Vec<RankedPost> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
            .into_iter()
            .map(|post| RankedPost { post, score: None })
            .collect()
    }
}
