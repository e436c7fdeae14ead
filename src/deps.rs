//! Argument kinds for task registration.
//!
//! Every argument bound into a computation is either a literal value or a future
//! result of another task. [`Arg`] carries that tag explicitly so the registration
//! catalog can record a dependency edge for each future while treating literals as
//! plain captured state.

use std::sync::Arc;

use crate::error::DagResult;
use crate::node::Node;
use crate::types::{FutureResult, TaskHandle};

/// One bound argument of a computation.
///
/// Futures convert into `Arg` on their own, so they can be passed straight to the
/// registration methods. Literal values are wrapped in [`Arg::Value`].
///
/// # Examples
///
/// ```
/// use lazydag::{Arg, Scheduler};
///
/// let scheduler = Scheduler::new();
/// let base = scheduler.add(|| 10);
/// let base = scheduler.get_future_result(&base);
///
/// // literal + future
/// let sum = scheduler.add2(|a: &i32, b: &i32| a + b, Arg::Value(5), &base);
///
/// assert_eq!(sum.dependencies().len(), 1);
/// assert_eq!(*scheduler.get_result(&sum).unwrap(), 15);
/// ```
#[derive(Debug, Clone)]
pub enum Arg<T> {
    /// A value known at registration time.
    Value(T),
    /// The result of another task, available once that task has executed.
    Future(FutureResult<T>),
}

impl<T: Send + Sync + 'static> Arg<T> {
    /// The task this argument waits on, if it is a future.
    pub(crate) fn dependency(&self) -> Option<Arc<dyn Node>> {
        match self {
            Arg::Value(_) => None,
            Arg::Future(future) => {
                let node: Arc<dyn Node> = future.task().task.clone();
                Some(node)
            }
        }
    }

    /// Borrow the argument's value, executing the producing task if it has not run.
    pub(crate) fn resolve(&self) -> DagResult<&T> {
        match self {
            Arg::Value(value) => Ok(value),
            Arg::Future(future) => future.task().get_result(),
        }
    }
}

impl<T> From<FutureResult<T>> for Arg<T> {
    fn from(future: FutureResult<T>) -> Self {
        Arg::Future(future)
    }
}

impl<T> From<&FutureResult<T>> for Arg<T> {
    fn from(future: &FutureResult<T>) -> Self {
        Arg::Future(future.clone())
    }
}

impl<T> From<&TaskHandle<T>> for Arg<T> {
    fn from(task: &TaskHandle<T>) -> Self {
        Arg::Future(FutureResult::new(task.clone()))
    }
}

/// Collect the dependency edges of a registration, in argument order.
pub(crate) fn future_dependencies<const N: usize>(
    args: [Option<Arc<dyn Node>>; N],
) -> Vec<Arc<dyn Node>> {
    args.into_iter().flatten().collect()
}
