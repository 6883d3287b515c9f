//! Stress tests for the execution queue

use prio_exec::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

#[test]
#[ignore] // Run with --ignored flag
fn stress_test_many_small_tasks() {
    let queue = ExecutionQueue::new();
    let counter = Rc::new(Cell::new(0u64));

    for i in 0..200_000 {
        let counter = counter.clone();
        queue.enqueue(i % 97, "small", move || counter.set(counter.get() + 1));
    }
    queue.run_all();

    assert_eq!(counter.get(), 200_000);
    assert!(queue.is_empty());
}

#[test]
#[ignore]
fn stress_test_deep_reentrant_chain() {
    fn link(queue: Rc<ExecutionQueue>, counter: Rc<Cell<u32>>, remaining: u32) {
        counter.set(counter.get() + 1);
        if remaining > 0 {
            let q = queue.clone();
            queue.enqueue(Priority::MEDIUM, "link", move || link(q, counter, remaining - 1));
        }
    }

    let queue = Rc::new(ExecutionQueue::new());
    let counter = Rc::new(Cell::new(0));

    let (q, c) = (queue.clone(), counter.clone());
    queue.enqueue(Priority::MEDIUM, "link", move || link(q, c, 100_000));
    queue.run_all();

    assert_eq!(counter.get(), 100_001);
}

#[test]
#[ignore]
fn stress_test_fan_out() {
    let queue = Rc::new(ExecutionQueue::new());
    let counter = Rc::new(Cell::new(0u32));

    for _ in 0..100 {
        let (q, c) = (queue.clone(), counter.clone());
        queue.enqueue(Priority::LOW, "parent", move || {
            for child in 0..100 {
                let c = c.clone();
                q.enqueue(child, "child", move || c.set(c.get() + 1));
            }
        });
    }

    let mut pops = 0;
    while queue.run_highest().more_pending {
        pops += 1;
    }

    assert_eq!(counter.get(), 10_000);
    assert_eq!(pops + 1, 10_100);
}
