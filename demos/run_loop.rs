//! Application run loop example
//!
//! Interleaves a simulated I/O reactor with the execution queue: after every
//! reactor poll the loop runs exactly one queued task, so a flood of
//! low-priority work never delays a high-priority completion by more than
//! one task.
//!
//! Run with `RUST_LOG=prio_exec=trace` to see per-task events.

use prio_exec::prelude::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Simulated I/O: completes one pending operation per poll.
#[derive(Default)]
struct Reactor {
    pending: RefCell<VecDeque<(Duration, Box<dyn FnOnce()>)>>,
}

impl Reactor {
    fn async_sleep<F>(&self, after: Duration, handler: ExecutorBinder<F, QueueExecutor<'static>>)
    where
        F: FnOnce(Duration) + 'static,
    {
        self.pending
            .borrow_mut()
            .push_back((after, Box::new(move || handler.invoke_with(after))));
    }

    fn poll_one(&self) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some((_, complete)) => {
                complete();
                true
            }
            None => false,
        }
    }
}

fn main() -> prio_exec::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Priority Run Loop Example ===\n");

    let config = QueueConfig::builder()
        .tie_break(TieBreak::Fifo)
        .initial_capacity(64)
        .build()?;
    let queue: &'static ExecutionQueue = Box::leak(Box::new(ExecutionQueue::with_config(config)?));
    let reactor = Reactor::default();

    // Low priority background work
    for i in 0..5 {
        queue.enqueue(Priority::LOW, format!("background-{}", i), move || {
            println!("[LOW] background task {}", i);
        });
    }

    // Timer completions land at high priority
    for ms in [30, 10, 20] {
        let handler = queue.wrap(Priority::HIGH, format!("timer-{}ms", ms), move |after: Duration| {
            println!("[HIGH] timer fired after {:?}", after);
        });
        reactor.async_sleep(Duration::from_millis(ms), handler);
    }

    // A medium task that schedules follow-up work from inside its body
    queue.enqueue(Priority::MEDIUM, "parse", move || {
        println!("[MEDIUM] parsing request");
        queue.enqueue(Priority::HIGH, "respond", || println!("[HIGH] responding"));
    });

    let mut more = true;
    while more || reactor.poll_one() {
        while reactor.poll_one() {}

        match queue.try_run_highest() {
            Ok(outcome) => {
                more = outcome.more_pending;
                if !outcome.label.is_empty() {
                    println!("    ran '{}' at priority {}", outcome.label, outcome.priority);
                }
            }
            Err(e) => {
                eprintln!("task failed: {}", e);
                more = !queue.is_empty();
            }
        }
    }

    let stats = queue.stats();
    println!("\nExecuted {} tasks (peak depth {})", stats.tasks_executed, stats.peak_pending);
    println!("p99 run time: {} ns", stats.p99_run_time_ns);

    println!("\n=== Example Complete ===");
    Ok(())
}
