//! Linear chain tests

use lazydag::{DagResult, Scheduler, TaskHandle};
use test_case::test_case;

use crate::common::assert_topological;

/// Builds `1 + 2 + ... + length` as a chain of single-argument tasks.
fn build_sum_chain(scheduler: &Scheduler, length: i64) -> Vec<TaskHandle<i64>> {
    let mut chain = vec![scheduler.add(|| 1_i64)];
    for step in 2..=length {
        let previous = scheduler.get_future_result(&chain[chain.len() - 1]);
        chain.push(scheduler.add1(move |x: &i64| x + step, previous));
    }
    chain
}

#[test_case(1, 1 ; "single task")]
#[test_case(2, 3 ; "two tasks")]
#[test_case(10, 55 ; "ten tasks")]
#[test_case(100, 5050 ; "hundred tasks")]
fn test_sum_chain(length: i64, expected: i64) -> DagResult<()> {
    let scheduler = Scheduler::new();
    let chain = build_sum_chain(&scheduler, length);

    scheduler.execute_all()?;

    assert_eq!(*scheduler.get_result(&chain[chain.len() - 1])?, expected);
    let edges: Vec<_> = chain
        .windows(2)
        .map(|pair| (pair[1].id(), pair[0].id()))
        .collect();
    assert_topological(&scheduler, &edges);
    Ok(())
}

#[test]
fn test_chain_tail_on_demand() -> DagResult<()> {
    let scheduler = Scheduler::new();
    let chain = build_sum_chain(&scheduler, 100);

    assert_eq!(*scheduler.get_result(&chain[49])?, 1275);
    assert!(chain[..50].iter().all(|task| task.is_executed()));
    assert!(chain[50..].iter().all(|task| !task.is_executed()));

    assert_eq!(*scheduler.get_result(&chain[99])?, 5050);
    Ok(())
}

#[test]
fn test_reverse_registered_chain() -> DagResult<()> {
    let scheduler = Scheduler::new();

    // Registered sink first; each task depends on the one registered after it
    let tasks: Vec<_> = (0..5).map(|i| scheduler.add(move || i)).collect();
    for pair in tasks.windows(2) {
        pair[0].add_dependent_task(&pair[1]);
    }

    scheduler.execute_all()?;

    let expected: Vec<_> = tasks.iter().rev().map(|task| task.id()).collect();
    assert_eq!(scheduler.order(), expected);
    Ok(())
}
