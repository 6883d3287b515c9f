//! Executor protocol and its adapter onto `ExecutionQueue`.
//!
//! Generic asynchronous machinery never runs a completion handler directly.
//! It asks the handler's associated executor to `dispatch`, `post` or
//! `defer` it. `QueueExecutor` answers all three by enqueueing the handler
//! on an `ExecutionQueue` at a bound priority.

pub mod binder;
pub mod queue_executor;
pub mod work_guard;

pub use binder::{bind_executor, AssociatedExecutor, ExecutorBinder};
pub use queue_executor::QueueExecutor;
pub use work_guard::{make_work_guard, WorkGuard};

/// Allocator hint passed along with submitted work.
///
/// Part of the protocol signature only; executors are free to ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultAllocator;

/// An execution context that deferred callables can be submitted to.
pub trait Executor: Clone + PartialEq {
    /// The context this executor submits into.
    type Context: ?Sized;

    /// Identity of the context, for comparison and propagation.
    fn context(&self) -> &Self::Context;

    /// Called when outstanding work is registered against this executor.
    fn on_work_started(&self);

    /// Called when previously registered work completes.
    fn on_work_finished(&self);

    /// Submit `f`, allowing it to run inline if the executor permits.
    fn dispatch<F, A>(&self, f: F, allocator: &A)
    where
        F: FnOnce() + 'static,
        A: ?Sized;

    /// Submit `f` for later execution, never inline.
    fn post<F, A>(&self, f: F, allocator: &A)
    where
        F: FnOnce() + 'static,
        A: ?Sized;

    /// Submit `f` as a continuation of the current work.
    fn defer<F, A>(&self, f: F, allocator: &A)
    where
        F: FnOnce() + 'static,
        A: ?Sized;
}
