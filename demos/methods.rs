//! # Methods as Tasks
//!
//! Binds methods of shared instances into the graph, both `&self` methods on an
//! `Arc<T>` and `&mut self` methods on an `Arc<Mutex<T>>`.
//!
//! ## Running This Example
//! ```bash
//! cargo run --example methods
//! ```
//!
//! ## Expected Output
//! ```text
//! Processed: Number: 12 (10 chars)
//! Audit log: ["Number: 12"]
//! ```

use std::sync::Arc;

use lazydag::{Arg, Scheduler};
use parking_lot::Mutex;

struct Calculator {
    offset: i32,
}

impl Calculator {
    fn add(&self, x: &i32) -> i32 {
        x + self.offset
    }
}

struct Formatter {
    prefix: &'static str,
}

#[allow(clippy::ptr_arg)]
impl Formatter {
    fn decorate(&self, text: &String) -> String {
        format!("{}{}", self.prefix, text)
    }
}

#[derive(Default)]
struct Audit {
    entries: Vec<String>,
}

#[allow(clippy::ptr_arg)]
impl Audit {
    fn log(&mut self, text: &String) -> usize {
        self.entries.push(text.clone());
        self.entries.len()
    }
}

fn main() {
    let scheduler = Scheduler::new();

    let calc = Arc::new(Calculator { offset: 7 });
    let formatter = Arc::new(Formatter {
        prefix: "Processed: ",
    });
    let audit = Arc::new(Mutex::new(Audit::default()));

    let number = scheduler.add_method1(&calc, Calculator::add, Arg::Value(5));
    let text = scheduler.add1(|n: &i32| format!("Number: {n}"), &number);
    let text = scheduler.get_future_result(&text);

    let decorated = scheduler.add_method1(&formatter, Formatter::decorate, &text);
    let length = scheduler.add1(|s: &String| s.len(), &text);
    let logged = scheduler.add_method_mut1(&audit, Audit::log, &text);

    scheduler.execute_all().unwrap();

    println!(
        "{} ({} chars)",
        scheduler.get_result(&decorated).unwrap(),
        scheduler.get_result(&length).unwrap()
    );
    assert_eq!(*scheduler.get_result(&logged).unwrap(), 1);
    println!("Audit log: {:?}", audit.lock().entries);
}
