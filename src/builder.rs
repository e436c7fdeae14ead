//! Registration catalog.
//!
//! A fixed set of registration shapes: zero, one or two arguments, infallible or
//! fallible computations, and methods bound to a shared instance. Every argument is an
//! [`Arg`]; each [`Arg::Future`] among them records a dependency edge, in argument
//! order, before the new task joins the scheduler's list.

use std::error::Error;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::deps::{future_dependencies, Arg};
use crate::error::DagError;
use crate::runner::Scheduler;
use crate::task::computation;
use crate::types::TaskHandle;

/// Error type accepted from fallible computations.
type BoxError = Box<dyn Error + Send + Sync + 'static>;

impl Scheduler {
    /// Register a computation without arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazydag::Scheduler;
    ///
    /// let scheduler = Scheduler::new();
    /// let greeting = scheduler.add(|| String::from("hello"));
    ///
    /// assert_eq!(scheduler.get_result(&greeting).unwrap(), "hello");
    /// ```
    pub fn add<R, F>(&self, mut f: F) -> TaskHandle<R>
    where
        R: Send + Sync + 'static,
        F: FnMut() -> R + Send + 'static,
    {
        self.register(Vec::new(), |_| computation(move || Ok(f())))
    }

    /// Register a computation of one argument.
    ///
    /// The argument is passed by reference; pass a [`crate::FutureResult`] to make the
    /// new task depend on the task behind it.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazydag::{Arg, Scheduler};
    ///
    /// let scheduler = Scheduler::new();
    ///
    /// let literal = scheduler.add1(|x: &i32| x + 1, Arg::Value(41));
    /// let deferred = scheduler.add1(|x: &i32| x * 2, scheduler.get_future_result(&literal));
    ///
    /// assert!(literal.dependencies().is_empty());
    /// assert_eq!(deferred.dependencies().len(), 1);
    /// assert_eq!(*scheduler.get_result(&deferred).unwrap(), 84);
    /// ```
    pub fn add1<A, R, F>(&self, mut f: F, a: impl Into<Arg<A>>) -> TaskHandle<R>
    where
        A: Send + Sync + 'static,
        R: Send + Sync + 'static,
        F: FnMut(&A) -> R + Send + 'static,
    {
        let a = a.into();
        let dependencies = future_dependencies([a.dependency()]);
        self.register(dependencies, |_| computation(move || Ok(f(a.resolve()?))))
    }

    /// Register a computation of two arguments.
    ///
    /// Any mix of literal values and futures is accepted. With two futures the task
    /// gets two dependency edges, first argument first.
    pub fn add2<A, B, R, F>(
        &self,
        mut f: F,
        a: impl Into<Arg<A>>,
        b: impl Into<Arg<B>>,
    ) -> TaskHandle<R>
    where
        A: Send + Sync + 'static,
        B: Send + Sync + 'static,
        R: Send + Sync + 'static,
        F: FnMut(&A, &B) -> R + Send + 'static,
    {
        let (a, b) = (a.into(), b.into());
        let dependencies = future_dependencies([a.dependency(), b.dependency()]);
        self.register(dependencies, |_| {
            computation(move || Ok(f(a.resolve()?, b.resolve()?)))
        })
    }

    /// Register a fallible computation without arguments.
    ///
    /// An `Err` from the computation is reported as [`DagError::TaskFailed`] carrying
    /// the original error, and leaves the task unexecuted so it can be retried.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazydag::{DagError, Scheduler};
    ///
    /// let scheduler = Scheduler::new();
    /// let parsed = scheduler.try_add(|| "12".parse::<i32>());
    /// let broken = scheduler.try_add(|| "twelve".parse::<i32>());
    ///
    /// assert_eq!(*scheduler.get_result(&parsed).unwrap(), 12);
    /// assert!(matches!(
    ///     scheduler.get_result(&broken),
    ///     Err(DagError::TaskFailed { .. })
    /// ));
    /// assert!(!broken.is_executed());
    /// ```
    pub fn try_add<R, E, F>(&self, mut f: F) -> TaskHandle<R>
    where
        R: Send + Sync + 'static,
        E: Into<BoxError>,
        F: FnMut() -> Result<R, E> + Send + 'static,
    {
        self.register(Vec::new(), |id| {
            computation(move || f().map_err(|e| DagError::task_failed(id.0, e)))
        })
    }

    /// Register a fallible computation of one argument.
    pub fn try_add1<A, R, E, F>(&self, mut f: F, a: impl Into<Arg<A>>) -> TaskHandle<R>
    where
        A: Send + Sync + 'static,
        R: Send + Sync + 'static,
        E: Into<BoxError>,
        F: FnMut(&A) -> Result<R, E> + Send + 'static,
    {
        let a = a.into();
        let dependencies = future_dependencies([a.dependency()]);
        self.register(dependencies, |id| {
            computation(move || f(a.resolve()?).map_err(|e| DagError::task_failed(id.0, e)))
        })
    }

    /// Register a fallible computation of two arguments.
    pub fn try_add2<A, B, R, E, F>(
        &self,
        mut f: F,
        a: impl Into<Arg<A>>,
        b: impl Into<Arg<B>>,
    ) -> TaskHandle<R>
    where
        A: Send + Sync + 'static,
        B: Send + Sync + 'static,
        R: Send + Sync + 'static,
        E: Into<BoxError>,
        F: FnMut(&A, &B) -> Result<R, E> + Send + 'static,
    {
        let (a, b) = (a.into(), b.into());
        let dependencies = future_dependencies([a.dependency(), b.dependency()]);
        self.register(dependencies, |id| {
            computation(move || {
                f(a.resolve()?, b.resolve()?).map_err(|e| DagError::task_failed(id.0, e))
            })
        })
    }

    /// Register a `&self` method bound to a shared instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lazydag::Scheduler;
    ///
    /// struct Calculator {
    ///     multiplier: i32,
    /// }
    ///
    /// impl Calculator {
    ///     fn multiplier(&self) -> i32 {
    ///         self.multiplier
    ///     }
    ///
    ///     fn multiply(&self, x: &i32) -> i32 {
    ///         x * self.multiplier
    ///     }
    /// }
    ///
    /// let scheduler = Scheduler::new();
    /// let calc = Arc::new(Calculator { multiplier: 5 });
    ///
    /// let m = scheduler.add_method(&calc, Calculator::multiplier);
    /// let product = scheduler.add_method1(&calc, Calculator::multiply, &m);
    ///
    /// scheduler.execute_all().unwrap();
    /// assert_eq!(*scheduler.get_result(&product).unwrap(), 25);
    /// ```
    pub fn add_method<S, R, M>(&self, instance: &Arc<S>, method: M) -> TaskHandle<R>
    where
        S: Send + Sync + 'static,
        R: Send + Sync + 'static,
        M: Fn(&S) -> R + Send + 'static,
    {
        let instance = Arc::clone(instance);
        self.register(Vec::new(), |_| computation(move || Ok(method(&*instance))))
    }

    /// Register a `&self` method of one argument bound to a shared instance.
    pub fn add_method1<S, A, R, M>(
        &self,
        instance: &Arc<S>,
        method: M,
        a: impl Into<Arg<A>>,
    ) -> TaskHandle<R>
    where
        S: Send + Sync + 'static,
        A: Send + Sync + 'static,
        R: Send + Sync + 'static,
        M: Fn(&S, &A) -> R + Send + 'static,
    {
        let instance = Arc::clone(instance);
        let a = a.into();
        let dependencies = future_dependencies([a.dependency()]);
        self.register(dependencies, |_| {
            computation(move || Ok(method(&*instance, a.resolve()?)))
        })
    }

    /// Register a `&mut self` method bound to a shared, lockable instance.
    ///
    /// The instance is locked only while the method runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use parking_lot::Mutex;
    /// use lazydag::Scheduler;
    ///
    /// struct Counter {
    ///     total: i32,
    /// }
    ///
    /// impl Counter {
    ///     fn bump(&mut self) -> i32 {
    ///         self.total += 1;
    ///         self.total
    ///     }
    /// }
    ///
    /// let scheduler = Scheduler::new();
    /// let counter = Arc::new(Mutex::new(Counter { total: 0 }));
    ///
    /// let first = scheduler.add_method_mut(&counter, Counter::bump);
    /// let second = scheduler.add_method_mut(&counter, Counter::bump);
    ///
    /// scheduler.execute_all().unwrap();
    /// assert_eq!(*first.get_result().unwrap(), 1);
    /// assert_eq!(*second.get_result().unwrap(), 2);
    /// assert_eq!(counter.lock().total, 2);
    /// ```
    pub fn add_method_mut<S, R, M>(&self, instance: &Arc<Mutex<S>>, mut method: M) -> TaskHandle<R>
    where
        S: Send + 'static,
        R: Send + Sync + 'static,
        M: FnMut(&mut S) -> R + Send + 'static,
    {
        let instance = Arc::clone(instance);
        self.register(Vec::new(), |_| {
            computation(move || {
                let mut guard = instance.lock();
                Ok(method(&mut *guard))
            })
        })
    }

    /// Register a `&mut self` method of one argument bound to a shared, lockable instance.
    ///
    /// The argument is resolved before the instance is locked.
    pub fn add_method_mut1<S, A, R, M>(
        &self,
        instance: &Arc<Mutex<S>>,
        mut method: M,
        a: impl Into<Arg<A>>,
    ) -> TaskHandle<R>
    where
        S: Send + 'static,
        A: Send + Sync + 'static,
        R: Send + Sync + 'static,
        M: FnMut(&mut S, &A) -> R + Send + 'static,
    {
        let instance = Arc::clone(instance);
        let a = a.into();
        let dependencies = future_dependencies([a.dependency()]);
        self.register(dependencies, |_| {
            computation(move || {
                let a = a.resolve()?;
                let mut guard = instance.lock();
                Ok(method(&mut *guard, a))
            })
        })
    }
}
