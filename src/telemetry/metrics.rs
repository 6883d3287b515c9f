//! Execution counters and body run-time histogram for one queue.

use crate::error::{Error, Result};
use hdrhistogram::Histogram;
use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

// One hour in nanoseconds.
const MAX_TRACKED_NS: u64 = 3_600_000_000_000;

/// Queue metrics collector.
///
/// Interior mutability only through `Cell`/`RefCell`: the queue is
/// single-threaded and so is its telemetry.
#[derive(Debug)]
pub struct Metrics {
    tasks_enqueued: Cell<u64>,
    tasks_executed: Cell<u64>,
    tasks_panicked: Cell<u64>,
    peak_pending: Cell<usize>,
    busy_time_ns: Cell<u64>,

    run_time_histogram: Option<RefCell<Histogram<u64>>>,

    start_time: Instant,
}

impl Metrics {
    /// Collector whose histogram keeps `sigfigs` significant figures.
    ///
    /// `QueueConfig::validate` already bounds `sigfigs`; the error guards
    /// direct callers passing an out-of-range precision.
    pub fn new(sigfigs: u8) -> Result<Self> {
        let histogram = Histogram::new_with_max(MAX_TRACKED_NS, sigfigs)
            .map_err(|e| Error::telemetry(format!("histogram: {:?}", e)))?;

        Ok(Self::with_histogram(Some(histogram)))
    }

    fn with_histogram(histogram: Option<Histogram<u64>>) -> Self {
        Self {
            tasks_enqueued: Cell::new(0),
            tasks_executed: Cell::new(0),
            tasks_panicked: Cell::new(0),
            peak_pending: Cell::new(0),
            busy_time_ns: Cell::new(0),
            run_time_histogram: histogram.map(RefCell::new),
            start_time: Instant::now(),
        }
    }

    /// Count an enqueue that left `pending` tasks in the queue.
    pub fn record_enqueue(&self, pending: usize) {
        self.tasks_enqueued.set(self.tasks_enqueued.get() + 1);
        if pending > self.peak_pending.get() {
            self.peak_pending.set(pending);
        }
    }

    /// Count a completed body and its own run time.
    pub fn record_execution(&self, elapsed: Duration) {
        let ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.tasks_executed.set(self.tasks_executed.get() + 1);
        self.busy_time_ns.set(self.busy_time_ns.get().saturating_add(ns));
        if let Some(histogram) = &self.run_time_histogram {
            histogram.borrow_mut().saturating_record(ns);
        }
    }

    /// Count a body that panicked.
    pub fn record_panic(&self) {
        self.tasks_panicked.set(self.tasks_panicked.get() + 1);
    }

    /// Current values, with `pending` supplied by the queue.
    pub fn snapshot(&self, pending: usize) -> QueueStats {
        let mut stats = QueueStats {
            uptime: self.start_time.elapsed(),
            pending,
            peak_pending: self.peak_pending.get(),
            tasks_enqueued: self.tasks_enqueued.get(),
            tasks_executed: self.tasks_executed.get(),
            tasks_panicked: self.tasks_panicked.get(),
            busy_time_ns: self.busy_time_ns.get(),
            ..QueueStats::default()
        };

        if let Some(histogram) = &self.run_time_histogram {
            let histogram = histogram.borrow();
            if histogram.len() > 0 {
                stats.avg_run_time_ns = histogram.mean() as u64;
                stats.p50_run_time_ns = histogram.value_at_quantile(0.50);
                stats.p99_run_time_ns = histogram.value_at_quantile(0.99);
                stats.max_run_time_ns = histogram.max();
            }
        }

        stats
    }

    /// Zero every counter and the histogram.
    pub fn reset(&self) {
        self.tasks_enqueued.set(0);
        self.tasks_executed.set(0);
        self.tasks_panicked.set(0);
        self.peak_pending.set(0);
        self.busy_time_ns.set(0);
        if let Some(histogram) = &self.run_time_histogram {
            histogram.borrow_mut().reset();
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        // Three significant figures is always a valid histogram precision.
        Self::with_histogram(Histogram::new_with_max(MAX_TRACKED_NS, 3).ok())
    }
}

/// Snapshot of queue metrics at a point in time
#[derive(Debug, Clone, Default)]
pub struct QueueStats {
    /// Time since the queue was created.
    pub uptime: Duration,
    /// Tasks waiting right now.
    pub pending: usize,
    /// Largest queue depth seen.
    pub peak_pending: usize,
    /// Tasks ever enqueued.
    pub tasks_enqueued: u64,
    /// Bodies that returned normally.
    pub tasks_executed: u64,
    /// Bodies that panicked.
    pub tasks_panicked: u64,
    /// Total body run time. Time spent in a nested body is counted once.
    pub busy_time_ns: u64,
    /// Mean body run time.
    pub avg_run_time_ns: u64,
    /// Median body run time.
    pub p50_run_time_ns: u64,
    /// 99th percentile body run time.
    pub p99_run_time_ns: u64,
    /// Longest body run time.
    pub max_run_time_ns: u64,
}

impl QueueStats {
    /// Tasks executed per second of queue lifetime
    pub fn tasks_per_second(&self) -> f64 {
        let seconds = self.uptime.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.tasks_executed as f64 / seconds
    }
}
