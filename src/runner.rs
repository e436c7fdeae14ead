//! Scheduler for task registration and execution.
//!
//! Owns every registered task in one ordered list, computes a cycle-checked
//! topological order over it, and drives either bulk execution of everything or
//! on-demand execution of a single task's dependency closure.
//!
//! Uses Mutex for interior mutability so that registration takes `&self`.

use std::any::type_name;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use parking_lot::Mutex;

#[cfg(feature = "tracing")]
use tracing::{debug, error, info, trace};

use crate::error::{DagError, DagResult};
use crate::node::{node_key, Node};
use crate::task::{Computation, RunGuard, Task};
use crate::types::{FutureResult, TaskHandle, TaskId};

/// Register lazy tasks and run them in dependency order.
///
/// # Workflow
///
/// 1. Create a scheduler with [`Scheduler::new`]
/// 2. Register computations with [`Scheduler::add`] and friends to get [`TaskHandle`]s
/// 3. Turn handles into [`FutureResult`]s with [`Scheduler::get_future_result`] and pass
///    them to later registrations to wire dependencies
/// 4. Either run everything with [`Scheduler::execute_all`], or ask for one value with
///    [`Scheduler::get_result`], which runs only what that value needs
///
/// Every task runs at most once; results are cached.
///
/// # Examples
///
/// ```
/// use lazydag::Scheduler;
///
/// let scheduler = Scheduler::new();
///
/// let a = scheduler.add(|| 10);
/// let b = scheduler.add1(|x: &i32| x * 2, scheduler.get_future_result(&a));
///
/// scheduler.execute_all().unwrap();
///
/// assert_eq!(*scheduler.get_result(&a).unwrap(), 10);
/// assert_eq!(*scheduler.get_result(&b).unwrap(), 20);
/// ```
///
/// # Concurrency
///
/// All work happens synchronously on the calling thread, and callers are expected to
/// serialize their use of one scheduler. Overlapping `execute_all` calls are rejected
/// with [`DagError::ConcurrentExecution`]. Two threads requesting results on demand
/// can meet on a shared dependency while it is executing; the later one then gets
/// [`DagError::CycleDetected`] even though the graph has no cycle.
pub struct Scheduler {
    pub(crate) tasks: Mutex<Vec<Arc<dyn Node>>>,
    pub(crate) next_id: Mutex<usize>,
    pub(crate) run_lock: AtomicBool, // Ensures only one execute_all() at a time
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

// Tasks are released last-registered first. A future argument always points at an
// earlier task, so each pop frees at most the popped task and nothing cascades.
impl Drop for Scheduler {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut();
        while let Some(task) = tasks.pop() {
            drop(task);
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("tasks", &self.order())
            .finish()
    }
}

impl Scheduler {
    /// Create an empty scheduler.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazydag::Scheduler;
    ///
    /// let scheduler = Scheduler::new();
    /// assert!(scheduler.is_empty());
    /// scheduler.execute_all().unwrap();
    /// ```
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
            run_lock: AtomicBool::new(false),
        }
    }

    pub(crate) fn alloc_id(&self) -> TaskId {
        let mut next_id = self.next_id.lock();
        let id = TaskId(*next_id);
        *next_id += 1;
        id
    }

    /// Create a task, record its dependency edges in order, then append it to the list.
    pub(crate) fn register<R>(
        &self,
        dependencies: Vec<Arc<dyn Node>>,
        computation: impl FnOnce(TaskId) -> Computation<R>,
    ) -> TaskHandle<R>
    where
        R: Send + Sync + 'static,
    {
        let id = self.alloc_id();
        let task = Arc::new(Task::new(id, computation(id)));

        for dependency in &dependencies {
            task.add_edge(dependency);
        }

        #[cfg(feature = "tracing")]
        debug!(
            task_id = id.0,
            result_type = type_name::<R>(),
            dependency_ids = ?dependencies.iter().map(|d| d.id().0).collect::<Vec<_>>(),
            "registered task"
        );

        let node: Arc<dyn Node> = task.clone();
        self.tasks.lock().push(node);

        TaskHandle::new(task)
    }

    /// Number of tasks in the scheduler's list.
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Ids of all tasks in the scheduler's current order.
    ///
    /// Registration order until [`Scheduler::execute_all`] succeeds in sorting,
    /// topological order afterwards.
    pub fn order(&self) -> Vec<TaskId> {
        self.tasks.lock().iter().map(|task| task.id()).collect()
    }

    /// Wrap a task handle into a future usable as an argument to a later registration.
    pub fn get_future_result<R>(&self, task: &TaskHandle<R>) -> FutureResult<R> {
        FutureResult::new(task.clone())
    }

    /// Result of `task`, executing it and its not-yet-executed dependencies on demand.
    ///
    /// Unlike [`Scheduler::execute_all`], this does not sort the task list and does not
    /// touch tasks outside `task`'s dependency closure.
    ///
    /// # Errors
    ///
    /// Propagates [`DagError::TaskFailed`] from the first computation that fails and
    /// [`DagError::CycleDetected`] if the closure contains a cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::atomic::{AtomicBool, Ordering};
    /// use std::sync::Arc;
    /// use lazydag::Scheduler;
    ///
    /// let scheduler = Scheduler::new();
    /// let unrelated_ran = Arc::new(AtomicBool::new(false));
    ///
    /// let flag = unrelated_ran.clone();
    /// let _unrelated = scheduler.add(move || flag.store(true, Ordering::SeqCst));
    /// let wanted = scheduler.add(|| "only me");
    ///
    /// assert_eq!(*scheduler.get_result(&wanted).unwrap(), "only me");
    /// assert!(!unrelated_ran.load(Ordering::SeqCst));
    /// ```
    pub fn get_result<'h, R>(&self, task: &'h TaskHandle<R>) -> DagResult<&'h R>
    where
        R: Send + Sync + 'static,
    {
        #[cfg(feature = "tracing")]
        trace!(task_id = task.id().0, "on-demand result requested");

        task.get_result()
    }

    /// Recover a typed handle for the task with the given id.
    ///
    /// # Errors
    ///
    /// - [`DagError::TaskNotFound`] if no task in the list has this id
    /// - [`DagError::TypeMismatch`] if the task does not produce an `R`
    pub fn handle<R>(&self, id: TaskId) -> DagResult<TaskHandle<R>>
    where
        R: Send + Sync + 'static,
    {
        let node = self
            .tasks
            .lock()
            .iter()
            .find(|task| task.id() == id)
            .cloned()
            .ok_or(DagError::TaskNotFound { task_id: id.0 })?;

        node.into_any()
            .downcast::<Task<R>>()
            .map(TaskHandle::new)
            .map_err(|_| DagError::TypeMismatch {
                task_id: id.0,
                expected: type_name::<R>(),
            })
    }

    /// Run every task in dependency order.
    ///
    /// This method:
    /// - Sorts the full task list topologically (depth-first, three-colour marking,
    ///   roots taken in list order) and keeps the sorted order
    /// - Executes each task in that order; tasks that already ran are skipped
    /// - Stops at the first failure, leaving later tasks unexecuted
    ///
    /// # Errors
    ///
    /// - [`DagError::CycleDetected`] if the graph has a cycle. The list is left as it was
    ///   and nothing is executed.
    /// - [`DagError::TaskFailed`] from the first failing computation.
    /// - [`DagError::ConcurrentExecution`] if another `execute_all` is in progress.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn execute_all(&self) -> DagResult<()> {
        #[cfg(feature = "tracing")]
        info!("starting bulk execution");

        let Some(_run_guard) = RunGuard::acquire(&self.run_lock) else {
            #[cfg(feature = "tracing")]
            error!("scheduler is already running - concurrent execution not supported");

            return Err(DagError::ConcurrentExecution);
        };

        // The list lock is released before any computation runs, so computations may
        // register further tasks.
        let order = {
            let mut tasks = self.tasks.lock();
            let order = topological_order(&tasks)?;
            *tasks = order.clone();
            order
        };

        #[cfg(feature = "tracing")]
        debug!(
            order = ?order.iter().map(|t| t.id().0).collect::<Vec<_>>(),
            "computed topological order"
        );

        for task in &order {
            if let Err(err) = task.execute() {
                #[cfg(feature = "tracing")]
                error!(task_id = task.id().0, error = %err, "bulk execution failed");

                return Err(err);
            }
        }

        #[cfg(feature = "tracing")]
        info!(task_count = order.len(), "bulk execution completed");

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

struct Frame {
    node: Arc<dyn Node>,
    dependencies: Vec<Arc<dyn Node>>,
    next: usize,
}

impl Frame {
    fn enter(node: Arc<dyn Node>, state: &mut HashMap<usize, Visit>) -> Self {
        state.insert(node_key(&node), Visit::InProgress);
        let dependencies = node.dependencies();
        Frame {
            node,
            dependencies,
            next: 0,
        }
    }
}

/// Depth-first topological sort with three-colour marking.
///
/// Roots are taken in slice order and dependencies in edge order; a task is emitted
/// once all of its dependencies have been emitted. Meeting a task that is still
/// in progress means the graph has a cycle.
///
/// The walk uses an explicit stack, so long dependency chains cannot exhaust the call
/// stack; the emitted order is the same as the recursive formulation's.
pub(crate) fn topological_order(tasks: &[Arc<dyn Node>]) -> DagResult<Vec<Arc<dyn Node>>> {
    let mut state: HashMap<usize, Visit> = HashMap::with_capacity(tasks.len());
    let mut order = Vec::with_capacity(tasks.len());
    let mut stack: Vec<Frame> = Vec::new();

    for root in tasks {
        if state.contains_key(&node_key(root)) {
            continue;
        }
        stack.push(Frame::enter(Arc::clone(root), &mut state));

        while let Some(frame) = stack.last_mut() {
            match frame.dependencies.get(frame.next).cloned() {
                Some(dependency) => {
                    frame.next += 1;
                    match state.get(&node_key(&dependency)).copied() {
                        Some(Visit::Done) => {}
                        Some(Visit::InProgress) => {
                            #[cfg(feature = "tracing")]
                            error!(task_id = dependency.id().0, "dependency cycle detected");

                            return Err(DagError::CycleDetected {
                                task_id: dependency.id().0,
                            });
                        }
                        None => stack.push(Frame::enter(dependency, &mut state)),
                    }
                }
                None => {
                    if let Some(done) = stack.pop() {
                        state.insert(node_key(&done.node), Visit::Done);
                        order.push(done.node);
                    }
                }
            }
        }
    }

    Ok(order)
}
