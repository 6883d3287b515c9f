//! Error types.

use crate::queue::Priority;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the queue.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid `QueueConfig`.
    #[error("config error: {0}")]
    Config(String),

    /// A task body panicked under `try_run_highest`.
    #[error("task '{label}' (priority {priority}) panicked: {message}")]
    TaskPanicked {
        /// Priority of the failed task.
        priority: Priority,
        /// Label of the failed task.
        label: String,
        /// Panic message.
        message: String,
    },

    /// Telemetry could not be set up.
    #[error("telemetry error: {0}")]
    Telemetry(String),
}

impl Error {
    /// Build an `Error::Config`.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Build an `Error::Telemetry`.
    pub fn telemetry<S: Into<String>>(msg: S) -> Self {
        Error::Telemetry(msg.into())
    }

    /// Build an `Error::TaskPanicked`.
    pub fn task_panicked<L, M>(priority: Priority, label: L, message: M) -> Self
    where
        L: Into<String>,
        M: Into<String>,
    {
        Error::TaskPanicked {
            priority,
            label: label.into(),
            message: message.into(),
        }
    }

    /// Label of the task that failed, if this error came from a task body.
    pub fn task_label(&self) -> Option<&str> {
        match self {
            Error::TaskPanicked { label, .. } => Some(label),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_panicked_display() {
        let err = Error::task_panicked(Priority::HIGH, "flush", "disk full");
        assert_eq!(
            err.to_string(),
            "task 'flush' (priority 100) panicked: disk full"
        );
        assert_eq!(err.task_label(), Some("flush"));
    }

    #[test]
    fn test_config_error_has_no_label() {
        let err = Error::config("bad");
        assert_eq!(err.to_string(), "config error: bad");
        assert!(err.task_label().is_none());
    }
}
