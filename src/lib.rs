//! prio-exec - priority-ordered execution queue
//!
//! A single-threaded scheduler for deferred work. Closures are enqueued with
//! an integer priority and a label and run highest-priority first, either one
//! per call or until the queue drains. Work enqueued by a running closure
//! joins the same heap and can run next.
//!
//! # Quick Start
//!
//! ```
//! use prio_exec::prelude::*;
//!
//! let queue = ExecutionQueue::new();
//! queue.enqueue(Priority::LOW, "cleanup", || println!("third"));
//! queue.enqueue(Priority::HIGH, "reply", || println!("first"));
//! queue.enqueue(Priority::MEDIUM, "log", || println!("second"));
//!
//! let outcome = queue.run_highest();
//! assert_eq!(outcome.label, "reply");
//! assert!(outcome.more_pending);
//!
//! queue.run_all();
//! assert!(queue.is_empty());
//! ```
//!
//! # Executor integration
//!
//! [`ExecutionQueue::wrap`] binds a completion handler to a
//! [`QueueExecutor`]. Asynchronous machinery that completes the wrapped
//! handler only enqueues it; it runs when the owning loop next pops the
//! queue.
//!
//! # Features
//!
//! - **telemetry** (default): counters and an `hdrhistogram` of body run
//!   times, exposed through [`ExecutionQueue::stats`].

// Lint configuration
#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod queue;
pub mod telemetry;

// Re-export key types at crate root
pub use config::{QueueConfig, QueueConfigBuilder, TieBreak};
pub use error::{Error, Result};
pub use executor::{
    bind_executor, make_work_guard, AssociatedExecutor, DefaultAllocator, Executor,
    ExecutorBinder, QueueExecutor, WorkGuard,
};
pub use queue::{ExecutionQueue, Priority, RunOutcome, TaskHandle};
pub use telemetry::QueueStats;
