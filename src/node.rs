//! Type-erased task interface.
//!
//! Tasks with different result types have to live in one ordered collection inside the
//! scheduler and have to point at each other through dependency edges. [`Node`] is the
//! capability set that makes this possible; typed results are only ever reached through
//! a [`crate::TaskHandle<R>`] or a checked downcast in [`crate::Scheduler::handle`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::DagResult;
use crate::types::TaskId;

/// Operations every task supports regardless of its result type.
///
/// Implemented by [`crate::Task<R>`]. Values of this trait are handed out by
/// [`crate::Task::dependencies`] and accepted by [`crate::Task::add_dependent_task`].
pub trait Node: Send + Sync + 'static {
    /// Identifier assigned at registration.
    fn id(&self) -> TaskId;

    /// Run the task (and whatever it still needs) unless it already ran.
    fn execute(&self) -> DagResult<()>;

    fn is_executed(&self) -> bool;

    /// Current dependency list, in the order edges were recorded.
    fn dependencies(&self) -> Vec<Arc<dyn Node>>;

    /// Record an edge from this task to `dependency`.
    fn add_dependency(&self, dependency: &Arc<dyn Node>);

    #[doc(hidden)]
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl fmt::Debug for dyn Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id())
            .field("executed", &self.is_executed())
            .finish()
    }
}

/// Identity of a node, stable for as long as the node is alive.
///
/// Task ids are only unique per scheduler, so graph traversals key on the allocation
/// instead.
pub(crate) fn node_key(node: &Arc<dyn Node>) -> usize {
    Arc::as_ptr(node) as *const () as usize
}
