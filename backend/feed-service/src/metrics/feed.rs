use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Duration of feed requests by ranking mode (personalized, recency).
    pub static ref FEED_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_request_duration_seconds",
        "Feed request duration segmented by ranking mode",
        &["ranking"]
    )
    .expect("failed to register feed_request_duration_seconds");

    /// Total feed requests served by ranking mode.
    pub static ref FEED_REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_request_total",
        "Total feed requests segmented by ranking mode",
        &["ranking"]
    )
    .expect("failed to register feed_request_total");

    /// Number of candidates ranked per request.
    pub static ref FEED_CANDIDATE_COUNT: HistogramVec = register_histogram_vec!(
        "feed_candidate_count",
        "Number of feed candidates ranked segmented by ranking mode",
        &["ranking"]
    )
    .expect("failed to register feed_candidate_count");

    /// Authenticated requests that fell back to recency (not_found, lookup_error).
    pub static ref FEED_VIEWER_FALLBACK_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_viewer_fallback_total",
        "Authenticated feed requests served by recency because the viewer could not be resolved",
        &["reason"]
    )
    .expect("failed to register feed_viewer_fallback_total");
}
