//! Lazy Task-Graph Executor
//!
//! A small, synchronous executor for graphs of memoized computations. Register
//! computations with a [`Scheduler`], wire one task's pending output into another
//! task's input with a [`FutureResult`], then either run everything in dependency
//! order or ask for a single result and let only what it needs run.
//!
//! # Features
//!
//! - **Run-once semantics**: every task's computation succeeds at most once; the result
//!   is cached and handed out by reference afterwards.
//! - **On-demand execution**: [`Scheduler::get_result`] runs exactly the not-yet-executed
//!   part of the requested task's dependency closure and nothing else.
//! - **Bulk execution**: [`Scheduler::execute_all`] sorts the whole task set
//!   topologically (depth-first, deterministic for a given registration order) and runs it.
//! - **Cycle detection**: cyclic graphs, which can only be built by adding edges by hand
//!   with [`Task::add_dependent_task`], are reported as [`DagError::CycleDetected`]
//!   instead of looping.
//! - **Typed handles over type-erased storage**: tasks with different result types share
//!   one list inside the scheduler, while callers only ever see [`TaskHandle<R>`].
//! - **Errors pass through untouched**: a failing computation's error reaches the caller
//!   as-is inside [`DagError::TaskFailed`]; the failed task stays unexecuted and can be
//!   retried.
//!
//! # Quick Start
//!
//! ```
//! use lazydag::Scheduler;
//!
//! let scheduler = Scheduler::new();
//!
//! let base = scheduler.add(|| 10);
//! let base = scheduler.get_future_result(&base);
//!
//! let left = scheduler.add1(|x: &i32| x + 5, &base);
//! let right = scheduler.add1(|x: &i32| x * 2, &base);
//!
//! let total = scheduler.add2(
//!     |l: &i32, r: &i32| l + r,
//!     scheduler.get_future_result(&left),
//!     scheduler.get_future_result(&right),
//! );
//!
//! scheduler.execute_all().unwrap();
//! assert_eq!(*scheduler.get_result(&total).unwrap(), 35);
//! ```
//!
//! # Registration Shapes
//!
//! Computations take at most two arguments. Each argument is an [`Arg`]: either a
//! literal [`Arg::Value`] or a future ([`FutureResult`], `&FutureResult` or
//! `&TaskHandle` convert directly). Arguments reach the computation by reference.
//!
//! | Method | Computation |
//! |--------|-------------|
//! | [`Scheduler::add`] | `FnMut() -> R` |
//! | [`Scheduler::add1`] | `FnMut(&A) -> R` |
//! | [`Scheduler::add2`] | `FnMut(&A, &B) -> R` |
//! | [`Scheduler::try_add`], [`Scheduler::try_add1`], [`Scheduler::try_add2`] | same, returning `Result<R, E>` |
//! | [`Scheduler::add_method`], [`Scheduler::add_method1`] | `Fn(&S[, &A]) -> R` on an `Arc<S>` |
//! | [`Scheduler::add_method_mut`], [`Scheduler::add_method_mut1`] | `FnMut(&mut S[, &A]) -> R` on an `Arc<Mutex<S>>` |
//!
//! Every future argument records a dependency edge from the new task to the task behind
//! the future, in argument order.
//!
//! # Execution Model
//!
//! Everything runs synchronously on the calling thread; there is no parallelism across
//! independent branches. Computations must be `Send + 'static` and results
//! `Send + Sync + 'static`, so a scheduler can be moved to another thread. Use of a
//! single scheduler must be serialized: concurrent on-demand requests that meet on a
//! task still executing report [`DagError::CycleDetected`].
//!
//! # Optional Tracing Support
//!
//! Enable the `tracing` feature to get structured logs from registration, sorting and
//! execution. Without the feature the instrumentation is compiled out.
//!
//! ```toml
//! [dependencies]
//! lazydag = { version = "0.1", features = ["tracing"] }
//! tracing-subscriber = "0.3"
//! ```
//!
//! - **INFO**: bulk execution start/completion
//! - **DEBUG**: task registration, dependency wiring, computed order
//! - **TRACE**: individual task execution, on-demand requests
//! - **ERROR**: cycles, task failures, concurrent bulk runs

// Module declarations
mod builder;
mod deps;
mod error;
mod node;
mod runner;
mod task;
mod types;

// Public re-exports
pub use deps::Arg;
pub use error::{DagError, DagResult, TaskError};
pub use node::Node;
pub use runner::Scheduler;
pub use task::Task;
pub use types::{FutureResult, TaskHandle, TaskId};
