//! Queue telemetry.
//!
//! Counts enqueued, executed and panicked tasks and keeps a histogram of
//! body run times for `ExecutionQueue::stats`.

#[cfg(feature = "telemetry")]
pub mod metrics;

#[cfg(feature = "telemetry")]
pub use metrics::{Metrics, QueueStats};

// Stub implementation when telemetry is disabled
#[cfg(not(feature = "telemetry"))]
pub mod metrics {
    //! No-op collector with the same surface as the real one.
    #![allow(missing_docs)]

    use crate::error::Result;
    use std::time::Duration;

    #[derive(Debug, Default)]
    pub struct Metrics;

    impl Metrics {
        pub fn new(_: u8) -> Result<Self> { Ok(Self) }
        pub fn record_enqueue(&self, _: usize) {}
        pub fn record_execution(&self, _: Duration) {}
        pub fn record_panic(&self) {}
        pub fn snapshot(&self, pending: usize) -> QueueStats {
            QueueStats { pending, ..QueueStats::default() }
        }
        pub fn reset(&self) {}
    }

    #[derive(Debug, Clone, Default)]
    pub struct QueueStats {
        pub uptime: Duration,
        pub pending: usize,
        pub peak_pending: usize,
        pub tasks_enqueued: u64,
        pub tasks_executed: u64,
        pub tasks_panicked: u64,
        pub busy_time_ns: u64,
        pub avg_run_time_ns: u64,
        pub p50_run_time_ns: u64,
        pub p99_run_time_ns: u64,
        pub max_run_time_ns: u64,
    }
}

#[cfg(not(feature = "telemetry"))]
pub use metrics::{Metrics, QueueStats};
