//! RAII registration of outstanding work.

use super::Executor;

/// Keeps work registered against an executor for as long as it lives.
///
/// Calls `on_work_started` on creation and `on_work_finished` exactly once,
/// on `reset` or on drop, whichever comes first.
#[derive(Debug)]
pub struct WorkGuard<E: Executor> {
    executor: E,
    owns_work: bool,
}

impl<E: Executor> WorkGuard<E> {
    /// Register outstanding work against `executor`.
    pub fn new(executor: E) -> Self {
        executor.on_work_started();
        Self {
            executor,
            owns_work: true,
        }
    }

    /// The executor work is registered against.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Whether the guard still holds its registration.
    pub fn owns_work(&self) -> bool {
        self.owns_work
    }

    /// Release the registration early.
    pub fn reset(&mut self) {
        if self.owns_work {
            self.executor.on_work_finished();
            self.owns_work = false;
        }
    }
}

impl<E: Executor> Drop for WorkGuard<E> {
    fn drop(&mut self) {
        self.reset();
    }
}

/// Shorthand for [`WorkGuard::new`].
pub fn make_work_guard<E: Executor>(executor: E) -> WorkGuard<E> {
    WorkGuard::new(executor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::{ExecutionQueue, Priority};
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingExecutor {
        outstanding: Rc<Cell<i64>>,
    }

    impl PartialEq for CountingExecutor {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.outstanding, &other.outstanding)
        }
    }

    impl Executor for CountingExecutor {
        type Context = Cell<i64>;

        fn context(&self) -> &Cell<i64> {
            &self.outstanding
        }

        fn on_work_started(&self) {
            self.outstanding.set(self.outstanding.get() + 1);
        }

        fn on_work_finished(&self) {
            self.outstanding.set(self.outstanding.get() - 1);
        }

        fn dispatch<F, A>(&self, f: F, _: &A)
        where
            F: FnOnce() + 'static,
            A: ?Sized,
        {
            f();
        }

        fn post<F, A>(&self, f: F, _: &A)
        where
            F: FnOnce() + 'static,
            A: ?Sized,
        {
            f();
        }

        fn defer<F, A>(&self, f: F, _: &A)
        where
            F: FnOnce() + 'static,
            A: ?Sized,
        {
            f();
        }
    }

    #[test]
    fn test_guard_balances_work_on_drop() {
        let ex = CountingExecutor::default();
        {
            let _a = make_work_guard(ex.clone());
            let _b = make_work_guard(ex.clone());
            assert_eq!(ex.context().get(), 2);
        }
        assert_eq!(ex.context().get(), 0);
    }

    #[test]
    fn test_reset_finishes_once() {
        let ex = CountingExecutor::default();
        let mut guard = WorkGuard::new(ex.clone());
        assert!(guard.owns_work());

        guard.reset();
        guard.reset();
        assert!(!guard.owns_work());
        assert_eq!(ex.context().get(), 0);

        drop(guard);
        assert_eq!(ex.context().get(), 0);
    }

    #[test]
    fn test_guard_over_queue_executor() {
        let queue = ExecutionQueue::new();
        let guard = make_work_guard(queue.executor(Priority::LOW, "keepalive"));

        assert_eq!(guard.executor().priority(), Priority::LOW);
        assert!(queue.is_empty());
    }
}
