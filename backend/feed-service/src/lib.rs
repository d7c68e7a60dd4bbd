/// Feed Service Library
///
/// Serves the ProConnect post feed, ranked per viewer by a hybrid of
/// content similarity, engagement and time decay.
///
/// # Modules
///
/// - `handlers`: Feed HTTP handler
/// - `models`: Posts, viewer context and score records
/// - `services`: Ranking pipeline and feed assembly
/// - `db`: Post and viewer stores (PostgreSQL)
/// - `middleware`: Bearer-token viewer authentication
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use services::{FeedRanker, FeedService, InteractionWeights, RankingWeights};
