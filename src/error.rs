//! Error types for task graph construction and execution.
//!
//! The scheduler itself only originates cycle and lookup errors. Failures raised by
//! user computations are carried through [`DagError::TaskFailed`] untouched: the
//! original error value is kept behind [`TaskError`] and is reachable through
//! [`std::error::Error::source`] or [`DagError::task_error`].

use std::sync::Arc;

use thiserror::Error;

/// Shared, type-erased error produced by a user computation.
///
/// Anything convertible into `Box<dyn Error + Send + Sync>` can be returned from a
/// fallible computation: concrete error types, `String` and `&str` included.
///
/// Stored behind an `Arc` so that the same failure can be reported to every task
/// downstream of the one that failed without re-running anything.
pub type TaskError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building or running a task graph.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum DagError {
    /// The dependency graph contains a cycle through this task.
    #[error(
        "Dependency cycle detected at task #{task_id}\n\
         \n\
         A task was reached again while its own dependencies were still being resolved."
    )]
    CycleDetected { task_id: usize },

    /// A task's computation returned an error. The task stays unexecuted.
    #[error("Task #{task_id} failed: {source}")]
    TaskFailed {
        task_id: usize,
        #[source]
        source: TaskError,
    },

    /// `execute_all` was called while another `execute_all` on the same scheduler was running.
    #[error("Scheduler is already running; concurrent execute_all() calls are not supported")]
    ConcurrentExecution,

    /// No task with this id is registered with the scheduler.
    #[error("Task #{task_id} is not registered with this scheduler")]
    TaskNotFound { task_id: usize },

    /// A typed lookup asked for a result type the task does not produce.
    #[error("Task #{task_id} does not produce a value of type `{expected}`")]
    TypeMismatch {
        task_id: usize,
        expected: &'static str,
    },
}

impl DagError {
    /// Wrap a computation failure for the task with the given id.
    pub(crate) fn task_failed<E>(task_id: usize, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        DagError::TaskFailed {
            task_id,
            source: Arc::from(err.into()),
        }
    }

    /// The original error raised by a computation, if this is a [`DagError::TaskFailed`].
    ///
    /// ```
    /// use lazydag::Scheduler;
    ///
    /// #[derive(Debug)]
    /// struct Boom;
    /// impl std::fmt::Display for Boom {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         f.write_str("boom")
    ///     }
    /// }
    /// impl std::error::Error for Boom {}
    ///
    /// let scheduler = Scheduler::new();
    /// let task = scheduler.try_add(|| Err::<i32, _>(Boom));
    ///
    /// let err = scheduler.get_result(&task).unwrap_err();
    /// assert!(err.task_error().unwrap().downcast_ref::<Boom>().is_some());
    /// ```
    pub fn task_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            DagError::TaskFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for scheduler and task operations
pub type DagResult<T> = Result<T, DagError>;
