//! Common imports.

pub use crate::config::{QueueConfig, QueueConfigBuilder, TieBreak};
pub use crate::error::{Error, Result};
pub use crate::executor::{
    bind_executor, AssociatedExecutor, DefaultAllocator, Executor, ExecutorBinder, QueueExecutor,
};
pub use crate::queue::{ExecutionQueue, Priority, RunOutcome};

pub use crate::telemetry::QueueStats;
