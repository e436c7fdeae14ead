//! Diamond pattern benchmarks (fan-out then fan-in)

use criterion::Criterion;
use lazydag::Scheduler;

pub fn bench_diamond(c: &mut Criterion) {
    c.bench_function("diamond_pattern_50", |b| {
        b.iter(|| {
            let scheduler = Scheduler::new();

            for i in 0..50 {
                let source = scheduler.add(move || i);
                let left = scheduler.add1(|x: &i32| x * 2, &source);
                let right = scheduler.add1(|x: &i32| x * 3, &source);
                scheduler.add2(|l: &i32, r: &i32| l + r, &left, &right);
            }

            scheduler.execute_all().unwrap();
        });
    });
}
