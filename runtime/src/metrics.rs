//! Store metrics for observability.
//!
//! Metrics are recorded through the `metrics` facade. Nothing is exported
//! unless the embedding application installs a recorder.

use metrics::{describe_counter, describe_histogram};
use std::time::Duration;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Register all metric descriptions.
///
/// Safe to call more than once; the last description wins.
pub fn register_metrics() {
    describe_counter!(
        "store_actions_processed_total",
        "Total number of actions reduced by the store, including dispatched follow-ups"
    );
    describe_counter!(
        "store_dispatched_actions_total",
        "Total number of actions fed back into the store by effects"
    );
    describe_counter!(
        "store_rejected_actions_total",
        "Total number of actions rejected because the store was shut down"
    );
    describe_counter!(
        "store_dispatch_depth_exceeded_total",
        "Total number of sends aborted because the dispatch chain was too long"
    );
    describe_histogram!(
        "store_reducer_duration_seconds",
        "Time taken by a single reducer invocation"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record one reducer invocation.
    pub fn record_action(duration: Duration) {
        counter!("store_actions_processed_total").increment(1);
        histogram!("store_reducer_duration_seconds").record(duration.as_secs_f64());
    }

    /// Record actions dispatched by effects.
    pub fn record_dispatched(count: usize) {
        counter!("store_dispatched_actions_total").increment(count as u64);
    }

    /// Record an action rejected after shutdown.
    pub fn record_rejected() {
        counter!("store_rejected_actions_total").increment(1);
    }

    /// Record a send aborted by the dispatch depth guard.
    pub fn record_depth_exceeded() {
        counter!("store_dispatch_depth_exceeded_total").increment(1);
    }
}
