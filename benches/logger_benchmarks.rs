//! Criterion benchmarks for hierarchical_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hierarchical_logger::prelude::*;
use std::sync::Arc;
use std::thread;

struct Null;

impl Appender for Null {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        black_box(entry);
        Ok(())
    }

    fn close(&self) {}

    fn name(&self) -> &str {
        "null"
    }
}

struct Silent;

impl Reporter for Silent {
    fn report(&self, _level: LogLevel, _text: &str) {}
}

fn hierarchy_with_null() -> Hierarchy {
    let hierarchy = Hierarchy::with_reporter(Arc::new(Silent));
    hierarchy.root().add_appender(Arc::new(Null));
    hierarchy
}

// ============================================================================
// Level Check Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let hierarchy = hierarchy_with_null();
    let shallow = hierarchy.get_logger("app");
    let deep = hierarchy.get_logger("app.service.module.component.detail");

    group.bench_function("disabled_shallow", |b| {
        b.iter(|| shallow.trace(black_box("Filtered message")));
    });

    group.bench_function("disabled_deep_chain", |b| {
        b.iter(|| deep.trace(black_box("Filtered message")));
    });

    group.bench_function("disabled_macro", |b| {
        b.iter(|| hierarchical_logger::trace!(deep, "value {}", black_box(42)));
    });

    hierarchy.disable_info();
    group.bench_function("disable_floor", |b| {
        b.iter(|| deep.info(black_box("Filtered message")));
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let hierarchy = hierarchy_with_null();
    let shallow = hierarchy.get_logger("app");
    let deep = hierarchy.get_logger("app.service.module.component.detail");
    hierarchy.get_logger("app.service").add_appender(Arc::new(Null));

    group.bench_function("info_shallow", |b| {
        b.iter(|| shallow.info(black_box("Info message")));
    });

    group.bench_function("info_deep_two_appenders", |b| {
        b.iter(|| deep.info(black_box("Info message")));
    });

    group.bench_function("info_with_ndc", |b| {
        let _context = Ndc::scoped("request-1234");
        b.iter(|| deep.info(black_box("Info message")));
    });

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for num_threads in [2, 4, 8].iter() {
        group.throughput(Throughput::Elements(*num_threads as u64 * 100));
        group.bench_function(format!("{}_threads", num_threads), |b| {
            let hierarchy = hierarchy_with_null();
            b.iter(|| {
                let handles: Vec<_> = (0..*num_threads)
                    .map(|t| {
                        let logger = hierarchy.get_logger(&format!("worker.{}", t));
                        thread::spawn(move || {
                            for i in 0..100 {
                                logger.info(format!("Message {}", i));
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Hierarchy and Context Benchmarks
// ============================================================================

fn bench_get_logger(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_logger");
    group.throughput(Throughput::Elements(1));

    let hierarchy = hierarchy_with_null();
    hierarchy.get_logger("app.service.module");

    group.bench_function("existing", |b| {
        b.iter(|| black_box(hierarchy.get_logger(black_box("app.service.module"))));
    });

    group.bench_function("create_fresh_hierarchy", |b| {
        b.iter(|| {
            let fresh = Hierarchy::with_reporter(Arc::new(Silent));
            black_box(fresh.get_logger("app.service.module"))
        });
    });

    group.finish();
}

fn bench_ndc(c: &mut Criterion) {
    let mut group = c.benchmark_group("ndc");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push_pop", |b| {
        b.iter(|| {
            Ndc::push(black_box("context"));
            Ndc::pop_void();
        });
    });

    group.bench_function("scoped_nested", |b| {
        let _outer = Ndc::scoped("outer");
        b.iter(|| {
            let _inner = Ndc::scoped(black_box("inner"));
            black_box(Ndc::get())
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_level_filtering,
    bench_dispatch,
    bench_concurrent_logging,
    bench_get_logger,
    bench_ndc
);

criterion_main!(benches);
