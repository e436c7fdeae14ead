//! Core type definitions for tasks and handles.
//!
//! This module defines the identifiers and typed handles callers hold on to:
//! [`TaskHandle`] owns a share of a registered task, [`FutureResult`] stands for
//! a value that task has not produced yet.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::task::Task;

/// Opaque task identifier, unique within one [`crate::Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub usize);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared, typed handle to a registered task.
///
/// Returned by every registration method on [`crate::Scheduler`]. The handle keeps
/// the task alive and dereferences to [`Task<R>`], so the task's own operations
/// (`execute`, `is_executed`, `dependencies`, ...) are available directly on it.
///
/// Handles are cheap to clone.
///
/// # Examples
///
/// ```
/// use lazydag::Scheduler;
///
/// let scheduler = Scheduler::new();
/// let answer = scheduler.add(|| 42);
///
/// assert!(!answer.is_executed());
/// assert_eq!(*scheduler.get_result(&answer).unwrap(), 42);
/// assert!(answer.is_executed());
/// ```
pub struct TaskHandle<R> {
    pub(crate) task: Arc<Task<R>>,
}

impl<R> TaskHandle<R> {
    pub(crate) fn new(task: Arc<Task<R>>) -> Self {
        Self { task }
    }

    /// Returns `true` if both handles refer to the same task.
    pub fn ptr_eq(&self, other: &TaskHandle<R>) -> bool {
        Arc::ptr_eq(&self.task, &other.task)
    }
}

impl<R> Clone for TaskHandle<R> {
    fn clone(&self) -> Self {
        Self {
            task: Arc::clone(&self.task),
        }
    }
}

impl<R> Deref for TaskHandle<R> {
    type Target = Task<R>;

    fn deref(&self) -> &Task<R> {
        &self.task
    }
}

impl<R> fmt::Debug for TaskHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TaskHandle").field(&self.task).finish()
    }
}

/// Typed placeholder for a task's not-yet-computed result.
///
/// Obtained from [`crate::Scheduler::get_future_result`] and passed as an argument to
/// a later registration. Passing it both binds the value as an input and records a
/// dependency edge from the new task to the one behind the future.
///
/// Many futures may point at the same task (fan-out); a future owns nothing beyond
/// its share of that task.
pub struct FutureResult<R> {
    task: TaskHandle<R>,
}

impl<R> FutureResult<R> {
    pub(crate) fn new(task: TaskHandle<R>) -> Self {
        Self { task }
    }

    /// The cached result, or `None` if the task has not executed yet.
    ///
    /// This never triggers execution. Use [`crate::Scheduler::get_result`] for that.
    pub fn get(&self) -> Option<&R> {
        self.task.cached()
    }

    /// The task that will produce this value.
    pub fn task(&self) -> &TaskHandle<R> {
        &self.task
    }
}

impl<R> Clone for FutureResult<R> {
    fn clone(&self) -> Self {
        Self {
            task: self.task.clone(),
        }
    }
}

impl<R> fmt::Debug for FutureResult<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FutureResult")
            .field("task", &self.task.id())
            .field("ready", &self.task.is_executed())
            .finish()
    }
}
