//! Priority-ordered execution queue.
//!
//! `ExecutionQueue` stores deferred closures tagged with a priority and a
//! label and releases them highest-priority first, either one at a time
//! (`run_highest`) or until empty (`run_all`). A running body may enqueue
//! more work on the same queue; that work competes on priority for the very
//! next pop.
//!
//! The queue is single-threaded: it is neither `Send` nor `Sync`, and bodies
//! carry no `Send` bound. Share it between bodies with `Rc`.

mod panic;
pub mod priority;
pub mod task;

pub use priority::Priority;
pub use task::TaskHandle;

use crate::config::QueueConfig;
use crate::error::{Error, Result};
use crate::executor::{bind_executor, ExecutorBinder, QueueExecutor};
use crate::telemetry::{Metrics, QueueStats};
use std::cell::{Cell, RefCell};
use std::collections::BinaryHeap;
use std::fmt;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};
use tracing::{debug, trace, trace_span, warn};

/// Result of a single `run_highest` call.
///
/// On an empty queue nothing runs and the outcome is
/// `RunOutcome::default()`, i.e. `(false, 0, "")`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunOutcome {
    /// Whether tasks remain after this one ran.
    pub more_pending: bool,
    /// Priority of the task that ran.
    pub priority: Priority,
    /// Label of the task that ran.
    pub label: String,
}

impl From<RunOutcome> for (bool, i32, String) {
    fn from(outcome: RunOutcome) -> Self {
        (outcome.more_pending, outcome.priority.get(), outcome.label)
    }
}

/// Single-threaded priority queue of deferred closures.
pub struct ExecutionQueue {
    heap: RefCell<BinaryHeap<TaskHandle>>,
    next_seq: Cell<u64>,
    config: QueueConfig,
    metrics: Metrics,

    // Bodies currently on the stack, and the time spent in bodies nested
    // inside the innermost one. A body's recorded run time excludes it.
    depth: Cell<u32>,
    nested_time: Cell<Duration>,
}

impl ExecutionQueue {
    /// Create an empty queue with the default configuration.
    pub fn new() -> Self {
        Self {
            heap: RefCell::new(BinaryHeap::new()),
            next_seq: Cell::new(0),
            config: QueueConfig::default(),
            metrics: Metrics::default(),
            depth: Cell::new(0),
            nested_time: Cell::new(Duration::ZERO),
        }
    }

    /// Create an empty queue from a validated configuration.
    pub fn with_config(config: QueueConfig) -> Result<Self> {
        config.validate()?;

        let metrics = Metrics::new(config.latency_sigfigs)?;

        Ok(Self {
            heap: RefCell::new(BinaryHeap::with_capacity(config.initial_capacity)),
            next_seq: Cell::new(0),
            config,
            metrics,
            depth: Cell::new(0),
            nested_time: Cell::new(Duration::ZERO),
        })
    }

    /// Configuration this queue was built with.
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Store `body` to run later at `priority`.
    ///
    /// Never runs `body` inline. Safe to call from inside a running body.
    pub fn enqueue<P, L, F>(&self, priority: P, label: L, body: F)
    where
        P: Into<Priority>,
        L: Into<String>,
        F: FnOnce() + 'static,
    {
        let seq = self.next_seq.get();
        self.next_seq.set(seq.wrapping_add(1));

        let task = TaskHandle::new(
            priority.into(),
            label.into(),
            seq,
            self.config.tie_break,
            body,
        );
        trace!(priority = task.priority().get(), label = task.label(), "task enqueued");

        let pending = {
            let mut heap = self.heap.borrow_mut();
            heap.push(task);
            heap.len()
        };
        self.metrics.record_enqueue(pending);
    }

    /// Pop and run tasks until the queue is empty, including tasks enqueued
    /// by the bodies that run along the way.
    ///
    /// A panicking body unwinds out of this call; it has already been removed
    /// and the rest of the queue is left intact.
    pub fn run_all(&self) {
        let mut executed = 0usize;

        while let Some(task) = self.pop() {
            let (priority, label, body) = task.into_parts();
            self.execute(priority, &label, body);
            executed += 1;
        }

        debug!(executed, "queue drained");
    }

    /// Pop and run at most one task, the current highest priority.
    pub fn run_highest(&self) -> RunOutcome {
        let Some(task) = self.pop() else {
            return RunOutcome::default();
        };

        let (priority, label, body) = task.into_parts();
        self.execute(priority, &label, body);

        RunOutcome {
            more_pending: !self.is_empty(),
            priority,
            label,
        }
    }

    /// Like `run_highest`, but a panicking body is caught and reported as
    /// `Error::TaskPanicked` instead of unwinding into the caller.
    pub fn try_run_highest(&self) -> Result<RunOutcome> {
        let Some(task) = self.pop() else {
            return Ok(RunOutcome::default());
        };

        let (priority, label, body) = task.into_parts();

        match catch_unwind(AssertUnwindSafe(|| self.execute(priority, &label, body))) {
            Ok(()) => Ok(RunOutcome {
                more_pending: !self.is_empty(),
                priority,
                label,
            }),
            Err(payload) => {
                let message = panic::panic_message(payload.as_ref());
                warn!(priority = priority.get(), label = %label, %message, "task panicked");
                Err(Error::task_panicked(priority, label, message))
            }
        }
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.heap.borrow().len()
    }

    /// Whether no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.borrow().is_empty()
    }

    /// Priority of the task `run_highest` would run next.
    pub fn peek_priority(&self) -> Option<Priority> {
        self.heap.borrow().peek().map(TaskHandle::priority)
    }

    /// Drop every pending task without running it. Returns how many were dropped.
    pub fn clear(&self) -> usize {
        // Release the borrow before the closures are dropped.
        let drained = std::mem::take(&mut *self.heap.borrow_mut());
        let dropped = drained.len();
        drop(drained);

        debug!(dropped, "queue cleared");
        dropped
    }

    /// Snapshot of the queue's counters and run-time histogram.
    pub fn stats(&self) -> QueueStats {
        self.metrics.snapshot(self.len())
    }

    /// Zero all counters and the run-time histogram.
    pub fn reset_stats(&self) {
        self.metrics.reset();
    }

    /// Executor that submits into this queue at `priority`.
    pub fn executor<P, L>(&self, priority: P, label: L) -> QueueExecutor<'_>
    where
        P: Into<Priority>,
        L: Into<String>,
    {
        QueueExecutor::new(self, priority.into(), label.into())
    }

    /// Bind `handler` to an executor on this queue.
    ///
    /// Invoking the returned binder only enqueues `handler`; it runs when the
    /// queue later pops it.
    pub fn wrap<P, L, F>(&self, priority: P, label: L, handler: F) -> ExecutorBinder<F, QueueExecutor<'_>>
    where
        P: Into<Priority>,
        L: Into<String>,
    {
        bind_executor(self.executor(priority, label), handler)
    }

    fn pop(&self) -> Option<TaskHandle> {
        self.heap.borrow_mut().pop()
    }

    fn execute(&self, priority: Priority, label: &str, body: Box<dyn FnOnce()>) {
        let _span = trace_span!("task", priority = priority.get(), label).entered();

        let depth = self.depth.get();
        self.depth.set(depth + 1);
        let outer_nested = self.nested_time.replace(Duration::ZERO);

        let start = Instant::now();
        let result = catch_unwind(AssertUnwindSafe(body));
        let elapsed = start.elapsed();

        self.depth.set(depth);
        let nested = self.nested_time.get();
        // The enclosing body, if any, sees this whole call as nested time.
        self.nested_time.set(if depth == 0 {
            Duration::ZERO
        } else {
            outer_nested + elapsed
        });

        match result {
            Ok(()) => {
                self.metrics.record_execution(elapsed.saturating_sub(nested));
                trace!("task finished");
            }
            Err(payload) => {
                self.metrics.record_panic();
                resume_unwind(payload);
            }
        }
    }
}

impl Default for ExecutionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ExecutionQueue {
    fn drop(&mut self) {
        let pending = self.heap.get_mut().len();
        if pending > 0 {
            debug!(pending, "dropping queue with unexecuted tasks");
        }
    }
}

impl fmt::Debug for ExecutionQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionQueue")
            .field("pending", &self.len())
            .field("tie_break", &self.config.tie_break)
            .finish()
    }
}
