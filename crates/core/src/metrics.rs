//! Prometheus metrics for core components.
//!
//! Covers the aggregation loop and the upstream page requests it issues.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Aggregations by outcome ("ok", "error").
pub static AGGREGATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("deskproxy_aggregations_total", "Total ticket aggregations"),
        &["result"],
    )
    .unwrap()
});

/// Aggregation duration in seconds.
pub static AGGREGATION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "deskproxy_aggregation_duration_seconds",
            "Duration of a full paginate-and-filter run",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["result"],
    )
    .unwrap()
});

/// Upstream page requests by source and outcome.
pub static UPSTREAM_PAGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "deskproxy_upstream_pages_total",
            "Ticket pages requested from the upstream",
        ),
        &["source", "result"],
    )
    .unwrap()
});

/// Tickets kept after the company filter.
pub static TICKETS_MATCHED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "deskproxy_tickets_matched_total",
        "Tickets returned after filtering",
    )
    .unwrap()
});

/// All core metrics, for registration by the server.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(AGGREGATIONS_TOTAL.clone()),
        Box::new(AGGREGATION_DURATION.clone()),
        Box::new(UPSTREAM_PAGES_TOTAL.clone()),
        Box::new(TICKETS_MATCHED_TOTAL.clone()),
    ]
}
