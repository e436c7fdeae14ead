//! # Tracing Scheduler Activity
//!
//! Shows the events emitted when the `tracing` feature is enabled: registration and
//! ordering at debug level, individual computations at trace level, failures and
//! cycles at error level.
//!
//! ## Running This Example
//! ```bash
//! RUST_LOG=lazydag=trace cargo run --example tracing_example --features tracing
//! ```

use lazydag::{DagError, Scheduler};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lazydag=debug")),
        )
        .init();

    let scheduler = Scheduler::new();

    let source = scheduler.add(|| 10);
    let left = scheduler.add1(|x: &i32| x + 1, &source);
    let right = scheduler.add1(|x: &i32| x * 2, &source);
    let sink = scheduler.add2(|l: &i32, r: &i32| l + r, &left, &right);

    scheduler.execute_all().unwrap();
    println!("Diamond result: {}", scheduler.get_result(&sink).unwrap());

    let failing = scheduler.try_add1(
        |x: &i32| if *x > 20 { Err("value out of range") } else { Ok(*x) },
        &sink,
    );
    if let Err(err) = scheduler.get_result(&failing) {
        println!("Expected failure: {err}");
    }

    let looped = scheduler.add(|| ());
    looped.add_dependent_task(&looped);
    if let Err(err @ DagError::CycleDetected { .. }) = scheduler.execute_all() {
        println!("Expected cycle: {err}");
    }
}
