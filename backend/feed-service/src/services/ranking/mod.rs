/// Ranking Module
///
/// Hybrid content/interaction ranking for the post feed.
///
/// # Architecture
/// - **Content layer**: binary cosine similarity between viewer and post tokens
/// - **Interaction layer**: weighted sum of views, likes and saves
/// - **Feed layer**: blends both, applies time decay and orders candidates
///
/// All scoring is pure and computed per request; nothing is cached or persisted.
pub mod content_similarity;
pub mod feed_ranker;
pub mod interaction;

pub use content_similarity::{similarity, TokenVectors};
pub use feed_ranker::{decay, days_old, FeedRanker, RankingWeights};
pub use interaction::{interaction_score, InteractionWeights};
