//! Service layer for feed-service
//!
//! - ranking: content similarity, interaction scoring and the feed ranker
//! - feed: candidate loading, viewer resolution and pagination

pub mod feed;
pub mod ranking;

pub use feed::{FeedPage, FeedService, PageRequest};
pub use ranking::{FeedRanker, InteractionWeights, RankingWeights};
