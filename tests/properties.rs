//! Property tests for ordering guarantees.

use prio_exec::prelude::*;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

fn load(queue: &ExecutionQueue, priorities: &[i32], log: &Rc<RefCell<Vec<(i32, usize)>>>) {
    for (id, &priority) in priorities.iter().enumerate() {
        let log = log.clone();
        queue.enqueue(priority, format!("task{}", id), move || {
            log.borrow_mut().push((priority, id))
        });
    }
}

proptest! {
    #[test]
    fn run_all_is_non_increasing(priorities in prop::collection::vec(any::<i32>(), 0..200)) {
        let queue = ExecutionQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        load(&queue, &priorities, &log);

        queue.run_all();

        let log = log.borrow();
        prop_assert_eq!(log.len(), priorities.len());
        prop_assert!(log.windows(2).all(|w| w[0].0 >= w[1].0));

        let ids: HashSet<usize> = log.iter().map(|&(_, id)| id).collect();
        prop_assert_eq!(ids.len(), priorities.len());
    }

    #[test]
    fn run_highest_matches_run_all(priorities in prop::collection::vec(-50i32..50, 0..100)) {
        let drained = ExecutionQueue::new();
        let drained_log = Rc::new(RefCell::new(Vec::new()));
        load(&drained, &priorities, &drained_log);
        drained.run_all();

        let stepped = ExecutionQueue::new();
        let stepped_log = Rc::new(RefCell::new(Vec::new()));
        load(&stepped, &priorities, &stepped_log);

        let mut outcomes = Vec::new();
        while !stepped.is_empty() {
            outcomes.push(stepped.run_highest());
        }
        prop_assert!(outcomes.last().map_or(true, |o| !o.more_pending));
        prop_assert_eq!(stepped.run_highest(), RunOutcome::default());

        prop_assert_eq!(outcomes.len(), priorities.len());
        let stepped_log = stepped_log.borrow().clone();
        let drained_log = drained_log.borrow().clone();
        prop_assert_eq!(&stepped_log, &drained_log);
        for (outcome, &(priority, id)) in outcomes.iter().zip(stepped_log.iter()) {
            prop_assert_eq!(outcome.priority.get(), priority);
            prop_assert_eq!(outcome.label.clone(), format!("task{}", id));
        }
    }

    #[test]
    fn equal_priorities_run_in_enqueue_order(count in 1usize..100, priority in any::<i32>()) {
        let queue = ExecutionQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        load(&queue, &vec![priority; count], &log);

        queue.run_all();

        let ids: Vec<usize> = log.borrow().iter().map(|&(_, id)| id).collect();
        prop_assert_eq!(ids, (0..count).collect::<Vec<_>>());
    }
}
