//! Very long dependency chains

use lazydag::{DagResult, Scheduler, TaskHandle};

fn build_chain(scheduler: &Scheduler, length: usize) -> Vec<TaskHandle<u64>> {
    let mut chain = vec![scheduler.add(|| 0_u64)];
    for _ in 1..length {
        let previous = scheduler.get_future_result(&chain[chain.len() - 1]);
        chain.push(scheduler.add1(|x: &u64| x + 1, previous));
    }
    chain
}

#[test]
fn test_ten_thousand_task_chain() -> DagResult<()> {
    let scheduler = Scheduler::new();
    let chain = build_chain(&scheduler, 10_000);

    scheduler.execute_all()?;

    assert_eq!(*scheduler.get_result(&chain[9_999])?, 9_999);
    assert_eq!(scheduler.len(), 10_000);
    Ok(())
}

/// Builds a chain keeping only the handle of its last task.
fn build_chain_tail(scheduler: &Scheduler, length: usize) -> TaskHandle<u64> {
    let mut last = scheduler.add(|| 0_u64);
    for _ in 1..length {
        last = scheduler.add1(|x: &u64| x + 1, &last);
    }
    last
}

#[test]
fn test_executed_chain_drop_scheduler_then_handle() -> DagResult<()> {
    let scheduler = Scheduler::new();
    let last = build_chain_tail(&scheduler, 10_000);

    scheduler.execute_all()?;
    assert_eq!(*scheduler.get_result(&last)?, 9_999);

    drop(scheduler);
    assert_eq!(*last.get_result()?, 9_999);
    drop(last);
    Ok(())
}

#[test]
fn test_executed_chain_drop_handle_then_scheduler() -> DagResult<()> {
    let scheduler = Scheduler::new();
    let last = build_chain_tail(&scheduler, 10_000);

    scheduler.execute_all()?;

    drop(last);
    drop(scheduler);
    Ok(())
}

#[test]
fn test_unexecuted_chain_drop_handle_then_scheduler() {
    let scheduler = Scheduler::new();
    let last = build_chain_tail(&scheduler, 10_000);

    assert!(!last.is_executed());
    drop(last);
    drop(scheduler);
}

#[test]
fn test_chain_registered_backwards() -> DagResult<()> {
    let scheduler = Scheduler::new();

    // The sort has to walk the whole chain from the first root it meets
    let tasks: Vec<_> = (0..10_000_u64).map(|i| scheduler.add(move || i)).collect();
    for pair in tasks.windows(2) {
        pair[0].add_dependent_task(&pair[1]);
    }

    scheduler.execute_all()?;

    let order = scheduler.order();
    assert_eq!(order.first(), Some(&tasks[9_999].id()));
    assert_eq!(order.last(), Some(&tasks[0].id()));
    Ok(())
}

#[test]
fn test_moderate_chain_on_demand() -> DagResult<()> {
    let scheduler = Scheduler::new();
    let chain = build_chain(&scheduler, 200);

    assert_eq!(*scheduler.get_result(&chain[199])?, 199);
    assert!(chain.iter().all(|task| task.is_executed()));
    Ok(())
}

#[test]
fn test_deep_chain_after_bulk_is_cached() -> DagResult<()> {
    let scheduler = Scheduler::new();
    let chain = build_chain(&scheduler, 5_000);

    scheduler.execute_all()?;

    // Every dependency already ran, so the on-demand path never recurses
    let last = scheduler.get_future_result(&chain[4_999]);
    assert_eq!(last.get(), Some(&4_999));
    Ok(())
}
