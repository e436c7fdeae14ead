//! Fan-out pattern benchmarks (one source, many readers)

use criterion::Criterion;
use lazydag::Scheduler;

pub fn bench_fanout(c: &mut Criterion) {
    c.bench_function("fanout_1_to_100", |b| {
        b.iter(|| {
            let scheduler = Scheduler::new();
            let source = scheduler.add(|| vec![1_u32; 1024]);
            let source = scheduler.get_future_result(&source);

            for k in 0..100 {
                scheduler.add1(move |v: &Vec<u32>| v.iter().map(|x| x * k).sum::<u32>(), &source);
            }

            scheduler.execute_all().unwrap();
        });
    });
}
