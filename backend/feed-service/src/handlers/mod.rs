/// HTTP handlers for feed-service
///
/// - feed: ranked post feed for the (optionally authenticated) viewer
pub mod feed;

pub use feed::{get_feed, FeedHandlerState};
