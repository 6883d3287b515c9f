//! Completion handlers bound to an executor.

use super::{DefaultAllocator, Executor};
use std::fmt;

/// A handler paired with the executor it must run on.
///
/// Invoking the binder does not call the handler. It posts the handler (with
/// its argument, if any) through the bound executor.
#[derive(Clone)]
pub struct ExecutorBinder<F, E> {
    handler: F,
    executor: E,
}

/// Pair `handler` with `executor`.
pub fn bind_executor<E, F>(executor: E, handler: F) -> ExecutorBinder<F, E>
where
    E: Executor,
{
    ExecutorBinder { handler, executor }
}

impl<F, E: Executor> ExecutorBinder<F, E> {
    /// The executor the handler is bound to.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// The wrapped handler.
    pub fn get_ref(&self) -> &F {
        &self.handler
    }

    /// Unwrap the handler, dropping the executor binding.
    pub fn into_inner(self) -> F {
        self.handler
    }

    /// Complete a handler that takes no arguments.
    pub fn invoke(self)
    where
        F: FnOnce() + 'static,
    {
        self.executor.post(self.handler, &DefaultAllocator);
    }

    /// Complete a handler with the result of the operation it waited on.
    pub fn invoke_with<T>(self, arg: T)
    where
        F: FnOnce(T) + 'static,
        T: 'static,
    {
        let handler = self.handler;
        self.executor.post(move || handler(arg), &DefaultAllocator);
    }
}

impl<F, E: fmt::Debug> fmt::Debug for ExecutorBinder<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorBinder")
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

/// Handlers that name the executor they expect to be completed on.
pub trait AssociatedExecutor {
    /// Executor type the handler is bound to.
    type Executor: Executor;

    /// A copy of the bound executor.
    fn associated_executor(&self) -> Self::Executor;
}

impl<F, E: Executor> AssociatedExecutor for ExecutorBinder<F, E> {
    type Executor = E;

    fn associated_executor(&self) -> E {
        self.executor.clone()
    }
}
