// Common test utilities and helpers for the test suite

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lazydag::{Scheduler, TaskId};
use parking_lot::Mutex;

/// Shared call counter that can be moved into computations.
#[derive(Clone, Default)]
pub struct Calls(Arc<AtomicUsize>);

impl Calls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Records the order in which computations ran.
#[derive(Clone, Default)]
pub struct ExecutionLog(Arc<Mutex<Vec<&'static str>>>);

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &'static str) {
        self.0.lock().push(name);
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().clone()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.lock().iter().position(|entry| *entry == name)
    }
}

/// Position of a task in the scheduler's current order.
pub fn position_of(scheduler: &Scheduler, id: TaskId) -> usize {
    scheduler
        .order()
        .iter()
        .position(|candidate| *candidate == id)
        .expect("task is in the scheduler")
}

/// Assert every dependency edge points backwards in the scheduler's order.
pub fn assert_topological(scheduler: &Scheduler, edges: &[(TaskId, TaskId)]) {
    for &(dependent, dependency) in edges {
        assert!(
            position_of(scheduler, dependency) < position_of(scheduler, dependent),
            "{} must come before {}",
            dependency,
            dependent
        );
    }
}
