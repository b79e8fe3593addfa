use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kiln::runtime::{BinaryOp, ProgramTables, Runtime, RuntimeConfig};

fn runtime() -> Runtime {
    Runtime::with_config(Arc::new(ProgramTables::default()), RuntimeConfig::default())
}

fn bench_box_int(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("box_int");
    for (name, n) in [("interned", 42_i64), ("fresh", 1_000_000)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &n, |b, &n| {
            b.iter(|| black_box(rt.box_int(black_box(n))))
        });
    }
    group.finish();
}

fn bench_arithmetic(c: &mut Criterion) {
    let rt = runtime();
    c.bench_function("sum_1000_ints", |b| {
        b.iter(|| {
            let one = rt.box_int(1);
            let mut acc = rt.box_int(0);
            for _ in 0..1000 {
                acc = rt.binary_op(BinaryOp::Add, &acc, &one).unwrap();
            }
            black_box(acc)
        })
    });
    c.bench_function("compare_doubles", |b| {
        let l = rt.box_float64(1.5);
        let r = rt.box_float64(2.5);
        b.iter(|| black_box(rt.binary_op(BinaryOp::Lt, &l, &r).unwrap()))
    });
}

criterion_group!(benches, bench_box_int, bench_arithmetic);
criterion_main!(benches);
