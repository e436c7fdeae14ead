//! # Getting Started: Your First Task Graph
//!
//! Solves `x² - 2x + 0 = 0` as a small graph of lazily evaluated tasks.
//!
//! ## What You'll Learn
//! - How to register closures with a [`Scheduler`]
//! - How to wire dependencies with `get_future_result`
//! - The difference between `execute_all` and on-demand `get_result`
//!
//! ## Running This Example
//! ```bash
//! cargo run --example basic
//! ```
//!
//! ## Expected Output
//! ```text
//! Root 1: 2
//! Root 2: 0
//! Discriminant computed once: true
//! ```

use lazydag::{Arg, Scheduler};

fn main() {
    let (a, b, c) = (1.0_f64, -2.0_f64, 0.0_f64);

    let scheduler = Scheduler::new();

    // Step 1: tasks that only take literal values have no dependencies
    let discriminant = scheduler.add2(
        move |b: &f64, ac: &f64| b * b - 4.0 * ac,
        Arg::Value(b),
        Arg::Value(a * c),
    );
    let d = scheduler.get_future_result(&discriminant);

    // Step 2: each future argument records a dependency edge
    let x1 = scheduler.add2(move |b: &f64, d: &f64| (-b + d.sqrt()) / (2.0 * a), Arg::Value(b), &d);
    let x2 = scheduler.add2(move |b: &f64, d: &f64| (-b - d.sqrt()) / (2.0 * a), Arg::Value(b), &d);

    // Step 3: ask for one result; only its dependency closure runs
    println!("Root 1: {}", scheduler.get_result(&x1).unwrap());
    assert!(!x2.is_executed());

    // Step 4: run everything that is left, in dependency order
    scheduler.execute_all().unwrap();
    println!("Root 2: {}", scheduler.get_result(&x2).unwrap());

    println!("Discriminant computed once: {}", d.get() == Some(&4.0));
}
