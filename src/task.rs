//! Memoized task implementation.
//!
//! A [`Task<R>`] wraps one computation together with everything it needs to run lazily:
//! the list of tasks it depends on, a write-once cache for its result, and a guard that
//! turns re-entrant execution (only reachable through a cyclic graph) into an error.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};

use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::{error, trace};

use crate::error::{DagError, DagResult};
use crate::node::Node;
use crate::types::{TaskHandle, TaskId};

/// Boxed computation with its arguments already bound.
///
/// Literal arguments are captured by value, futures are resolved when it is called.
pub(crate) type Computation<R> = Box<dyn FnMut() -> DagResult<R> + Send>;

pub(crate) fn computation<R, F>(f: F) -> Computation<R>
where
    F: FnMut() -> DagResult<R> + Send + 'static,
{
    Box::new(f)
}

// Guard to ensure an in-progress flag is released even on early return or panic
pub(crate) struct RunGuard<'a> {
    pub(crate) lock: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    /// Claim `lock`, or return `None` if it is already held.
    pub(crate) fn acquire(lock: &'a AtomicBool) -> Option<Self> {
        lock.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RunGuard { lock })
    }
}

impl<'a> Drop for RunGuard<'a> {
    fn drop(&mut self) {
        self.lock.store(false, Ordering::SeqCst);
    }
}

/// A unit of deferred, memoized computation.
///
/// Tasks are created by the registration methods on [`crate::Scheduler`] and reached
/// through a [`TaskHandle<R>`], which dereferences to this type.
///
/// # Lifecycle
///
/// - The computation runs at most once successfully. After that the result is cached
///   and never changes; further `execute` calls are no-ops.
/// - If the computation fails, the task stays unexecuted and can be retried.
/// - Dependency edges are non-owning: the scheduler and the handles own tasks, the
///   edges only point at them. The values a task consumes are kept alive by the
///   futures captured in its own computation until it succeeds; the computation is
///   released then.
///
/// # Dropping long chains
///
/// Dropping a [`crate::Scheduler`] releases its tasks one at a time. A handle that
/// outlives its scheduler and heads a long chain of *unexecuted* tasks still frees
/// that chain recursively when it goes, one stack frame per link. Execute the chain
/// first or drop such handles before the scheduler.
///
/// # Concurrency
///
/// Execution of a task is guarded by an in-progress flag. A second caller reaching
/// a task that is already executing, whether through a cycle or a concurrent
/// on-demand request from another thread, gets [`DagError::CycleDetected`].
///
/// # Examples
///
/// ```
/// use lazydag::Scheduler;
///
/// let scheduler = Scheduler::new();
/// let base = scheduler.add(|| 10);
/// let doubled = scheduler.add1(|x: &i32| x * 2, scheduler.get_future_result(&base));
///
/// assert_eq!(doubled.dependencies().len(), 1);
///
/// // Executing a task runs what it depends on first.
/// doubled.execute().unwrap();
/// assert!(base.is_executed());
/// assert_eq!(*doubled.get_result().unwrap(), 20);
/// ```
pub struct Task<R> {
    id: TaskId,
    computation: Mutex<Option<Computation<R>>>,
    result: OnceLock<R>,
    running: AtomicBool,
    dependencies: Mutex<Vec<Weak<dyn Node>>>,
}

impl<R> Task<R> {
    /// The id assigned at registration.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Whether the computation has completed successfully.
    pub fn is_executed(&self) -> bool {
        self.result.get().is_some()
    }

    /// Record that this task depends on `other`.
    ///
    /// Registration already records an edge for every future argument; calling this
    /// by hand adds extra edges, which is how tests build malformed (cyclic) graphs.
    pub fn add_dependent_task<D: Send + Sync + 'static>(&self, other: &TaskHandle<D>) {
        let node: Arc<dyn Node> = other.task.clone();
        self.add_edge(&node);
    }

    /// Snapshot of the dependency list.
    ///
    /// Dependencies whose tasks have since been dropped everywhere are left out.
    pub fn dependencies(&self) -> Vec<Arc<dyn Node>> {
        self.dependencies
            .lock()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    pub(crate) fn cached(&self) -> Option<&R> {
        self.result.get()
    }

    pub(crate) fn add_edge(&self, dependency: &Arc<dyn Node>) {
        self.dependencies.lock().push(Arc::downgrade(dependency));
    }
}

impl<R: Send + Sync + 'static> Task<R> {
    pub(crate) fn new(id: TaskId, computation: Computation<R>) -> Self {
        Self {
            id,
            computation: Mutex::new(Some(computation)),
            result: OnceLock::new(),
            running: AtomicBool::new(false),
            dependencies: Mutex::new(Vec::new()),
        }
    }

    /// Run this task if it has not run yet.
    ///
    /// Every dependency that has not executed yet is executed first, in the order the
    /// edges were recorded. Then the computation runs and its value is cached.
    ///
    /// # Errors
    ///
    /// - [`DagError::TaskFailed`] if this task's computation, or a dependency's, fails.
    ///   The error is returned exactly as the failing task produced it.
    /// - [`DagError::CycleDetected`] if the task is reached again while it is still
    ///   resolving its own dependencies.
    pub fn execute(&self) -> DagResult<()> {
        self.resolve().map(|_| ())
    }

    /// The cached result, executing the task first if needed.
    ///
    /// For tasks whose computation returns `()` this is just the execution trigger.
    ///
    /// # Errors
    ///
    /// Same as [`Task::execute`].
    pub fn get_result(&self) -> DagResult<&R> {
        self.resolve()
    }

    fn resolve(&self) -> DagResult<&R> {
        if let Some(value) = self.result.get() {
            return Ok(value);
        }

        let Some(_running) = RunGuard::acquire(&self.running) else {
            #[cfg(feature = "tracing")]
            error!(task_id = self.id.0, "task re-entered while executing");

            return Err(DagError::CycleDetected { task_id: self.id.0 });
        };

        for dependency in self.dependencies() {
            if dependency.is_executed() {
                continue;
            }
            dependency.execute()?;
        }

        #[cfg(feature = "tracing")]
        trace!(task_id = self.id.0, "running task computation");

        let value = {
            let mut computation = self.computation.lock();
            match computation.as_mut() {
                Some(computation) => computation(),
                // Released only after a successful run
                None => {
                    return self
                        .result
                        .get()
                        .ok_or(DagError::CycleDetected { task_id: self.id.0 })
                }
            }
        };

        match value {
            Ok(value) => {
                let value = self.result.get_or_init(|| value);
                // Drops the futures this task held on its dependencies
                let released = self.computation.lock().take();
                drop(released);
                Ok(value)
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                error!(task_id = self.id.0, error = %err, "task failed");

                Err(err)
            }
        }
    }
}

impl<R: Send + Sync + 'static> Node for Task<R> {
    fn id(&self) -> TaskId {
        self.id
    }

    fn execute(&self) -> DagResult<()> {
        Task::execute(self)
    }

    fn is_executed(&self) -> bool {
        Task::is_executed(self)
    }

    fn dependencies(&self) -> Vec<Arc<dyn Node>> {
        Task::dependencies(self)
    }

    fn add_dependency(&self, dependency: &Arc<dyn Node>) {
        self.add_edge(dependency);
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl<R> fmt::Debug for Task<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("executed", &self.result.get().is_some())
            .field("dependencies", &self.dependencies.lock().len())
            .finish()
    }
}
