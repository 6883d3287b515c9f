//! Owned, type-erased units of deferred work.

use super::priority::Priority;
use crate::config::TieBreak;
use std::cmp::Ordering;
use std::fmt;

/// One pending piece of work: priority, label and a run-once body.
///
/// Handles are move-only. The queue owns them while pending and gives up
/// ownership at pop time, so a body can never be invoked twice.
pub struct TaskHandle {
    priority: Priority,
    label: String,
    // Secondary ordering key among equal priorities; larger pops first.
    tie_key: u64,
    body: Box<dyn FnOnce()>,
}

impl TaskHandle {
    pub(crate) fn new<F>(priority: Priority, label: String, seq: u64, tie_break: TieBreak, body: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let tie_key = match tie_break {
            TieBreak::Fifo => u64::MAX - seq,
            TieBreak::Lifo => seq,
        };

        TaskHandle {
            priority,
            label,
            tie_key,
            body: Box::new(body),
        }
    }

    /// Priority the task was enqueued with.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Descriptive label; takes no part in ordering.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn into_parts(self) -> (Priority, String, Box<dyn FnOnce()>) {
        (self.priority, self.label, self.body)
    }
}

impl PartialEq for TaskHandle {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.tie_key == other.tie_key
    }
}

impl Eq for TaskHandle {}

impl PartialOrd for TaskHandle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TaskHandle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.tie_key.cmp(&other.tie_key))
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("priority", &self.priority)
            .field("label", &self.label)
            .finish()
    }
}
