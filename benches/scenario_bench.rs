//! Benchmarks for scopekit scenarios
//!
//! Compares sequential and parallel children with a tiny per-case delay, so
//! the thread start-up cost of `run_parallel` shows up next to the savings.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scopekit::{Config, DemoStore, Scenario};

const CASE_DELAY: Duration = Duration::from_millis(1);

fn scenario_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("children");
    group.sample_size(20);

    for cases in [1usize, 4, 9] {
        group.bench_with_input(BenchmarkId::new("sequential", cases), &cases, |b, &n| {
            b.iter(|| {
                black_box(Scenario::root("bench", Config::default(), |root| {
                    for i in 0..n {
                        root.run(&i.to_string(), |_| std::thread::sleep(CASE_DELAY));
                    }
                }))
            })
        });

        group.bench_with_input(BenchmarkId::new("parallel", cases), &cases, |b, &n| {
            b.iter(|| {
                black_box(Scenario::root("bench", Config::default(), |root| {
                    root.run_parallel(0..n, |_, _| std::thread::sleep(CASE_DELAY));
                }))
            })
        });
    }

    group.finish();
}

fn cleanup_benchmarks(c: &mut Criterion) {
    c.bench_function("cleanup_stack_100", |b| {
        b.iter(|| {
            black_box(Scenario::root("bench", Config::default(), |root| {
                for _ in 0..100 {
                    root.cleanup(|_| {});
                }
            }))
        })
    });

    c.bench_function("store_add_remove_100", |b| {
        let keys: Vec<String> = (0..100).map(|i| format!("key{}", i)).collect();
        b.iter(|| {
            let mut store = DemoStore::new();
            for key in &keys {
                store.add(key.as_str());
            }
            for key in &keys {
                store.remove(key);
            }
            black_box(store.len())
        })
    });
}

criterion_group!(benches, scenario_benchmarks, cleanup_benchmarks);
criterion_main!(benches);
