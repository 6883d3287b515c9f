//! `Executor` implementation that enqueues onto an `ExecutionQueue`.

use super::Executor;
use crate::queue::{ExecutionQueue, Priority};
use std::fmt;

/// Executor bound to an `ExecutionQueue`, a priority and a label.
///
/// Holds a plain borrow of the queue, so it can never outlive it. Every
/// submission is enqueued; nothing runs inline, not even on `dispatch`.
///
/// Two executors are equal when they share the queue instance and the
/// priority. The label is descriptive only and takes no part in equality,
/// so `Hash` is not implemented.
#[derive(Clone)]
pub struct QueueExecutor<'q> {
    queue: &'q ExecutionQueue,
    priority: Priority,
    label: String,
}

impl<'q> QueueExecutor<'q> {
    /// Bind `queue` at `priority`, tagging submissions with `label`.
    pub fn new(queue: &'q ExecutionQueue, priority: Priority, label: String) -> Self {
        Self {
            queue,
            priority,
            label,
        }
    }

    /// The queue submissions go to.
    pub fn queue(&self) -> &'q ExecutionQueue {
        self.queue
    }

    /// Priority every submission is enqueued at.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Label every submission is enqueued with.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn submit<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.queue.enqueue(self.priority, self.label.clone(), f);
    }
}

impl Executor for QueueExecutor<'_> {
    type Context = ExecutionQueue;

    fn context(&self) -> &ExecutionQueue {
        self.queue
    }

    fn on_work_started(&self) {}

    fn on_work_finished(&self) {}

    fn dispatch<F, A>(&self, f: F, _allocator: &A)
    where
        F: FnOnce() + 'static,
        A: ?Sized,
    {
        self.submit(f);
    }

    fn post<F, A>(&self, f: F, _allocator: &A)
    where
        F: FnOnce() + 'static,
        A: ?Sized,
    {
        self.submit(f);
    }

    fn defer<F, A>(&self, f: F, _allocator: &A)
    where
        F: FnOnce() + 'static,
        A: ?Sized,
    {
        self.submit(f);
    }
}

impl PartialEq for QueueExecutor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.queue, other.queue) && self.priority == other.priority
    }
}

impl Eq for QueueExecutor<'_> {}

impl fmt::Debug for QueueExecutor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueExecutor")
            .field("queue", &(self.queue as *const ExecutionQueue))
            .field("priority", &self.priority)
            .field("label", &self.label)
            .finish()
    }
}
