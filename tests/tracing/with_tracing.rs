//! Tests with tracing feature enabled

use lazydag::{DagError, Scheduler};

use tracing_subscriber::{fmt, EnvFilter};

fn init_subscriber() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_tracing_with_subscriber() {
    init_subscriber();

    let scheduler = Scheduler::new();

    let a = scheduler.add(|| 2);
    let b = scheduler.add(|| 3);
    let sum = scheduler.add2(|x: &i32, y: &i32| x + y, &a, &b);

    scheduler.execute_all().unwrap();

    assert_eq!(*scheduler.get_result(&sum).unwrap(), 5);
}

#[test]
fn test_tracing_with_diamond() {
    init_subscriber();

    let scheduler = Scheduler::new();

    let source = scheduler.add(|| 10);
    let left = scheduler.add2(|x: &i32, y: &i32| x + y, &source, &source);
    let right = scheduler.add2(|x: &i32, y: &i32| x * y, &source, &source);
    let sink = scheduler.add2(|x: &i32, y: &i32| x + y, &left, &right);

    scheduler.execute_all().unwrap();

    assert_eq!(*scheduler.get_result(&sink).unwrap(), 120);
}

#[test]
fn test_tracing_on_error_paths() {
    init_subscriber();

    let scheduler = Scheduler::new();

    let failing = scheduler.try_add(|| Err::<i32, _>("traced failure"));
    assert!(matches!(
        scheduler.execute_all(),
        Err(DagError::TaskFailed { .. })
    ));

    let looped = scheduler.add(|| 1);
    looped.add_dependent_task(&looped);
    assert!(matches!(
        scheduler.get_result(&looped),
        Err(DagError::CycleDetected { .. })
    ));
    assert!(!failing.is_executed());
}
