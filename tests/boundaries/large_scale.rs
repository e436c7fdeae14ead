//! Wide graphs and large results

use lazydag::{DagResult, Scheduler};

use crate::common::{assert_topological, Calls};

#[test]
fn test_wide_layer_fan_in() -> DagResult<()> {
    let scheduler = Scheduler::new();

    let sources: Vec<_> = (1..=1_000_u64).map(|i| scheduler.add(move || i)).collect();
    let mut total = scheduler.add(|| 0_u64);
    for source in &sources {
        total = scheduler.add2(|acc: &u64, x: &u64| acc + x, &total, source);
    }

    scheduler.execute_all()?;

    assert_eq!(*scheduler.get_result(&total)?, 500_500);
    Ok(())
}

#[test]
fn test_large_result_is_not_copied() -> DagResult<()> {
    let scheduler = Scheduler::new();
    let calls = Calls::new();

    let c = calls.clone();
    let buffer = scheduler.add(move || {
        c.tick();
        vec![0xAB_u8; 10 * 1024 * 1024]
    });
    let buffer = scheduler.get_future_result(&buffer);

    let readers: Vec<_> = (0..8_usize)
        .map(|offset| scheduler.add1(move |data: &Vec<u8>| data[offset * 1024], &buffer))
        .collect();

    scheduler.execute_all()?;

    for reader in &readers {
        assert_eq!(*scheduler.get_result(reader)?, 0xAB);
    }
    assert_eq!(calls.count(), 1);

    let first = buffer.get().expect("executed").as_ptr();
    let again = scheduler.get_result(buffer.task())?.as_ptr();
    assert_eq!(first, again);
    Ok(())
}

#[test]
fn test_layered_grid() -> DagResult<()> {
    let scheduler = Scheduler::new();
    const WIDTH: usize = 20;
    const DEPTH: usize = 20;

    let mut layer: Vec<_> = (0..WIDTH).map(|_| scheduler.add(|| 1_u64)).collect();
    let mut edges = Vec::new();
    for _ in 1..DEPTH {
        let next: Vec<_> = (0..WIDTH)
            .map(|i| {
                let left = &layer[i];
                let right = &layer[(i + 1) % WIDTH];
                let task = scheduler.add2(|a: &u64, b: &u64| a + b, left, right);
                edges.push((task.id(), left.id()));
                edges.push((task.id(), right.id()));
                task
            })
            .collect();
        layer = next;
    }

    scheduler.execute_all()?;

    // Each value doubles per layer
    for task in &layer {
        assert_eq!(*scheduler.get_result(task)?, 1 << (DEPTH - 1));
    }
    assert_topological(&scheduler, &edges);
    Ok(())
}
