use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kiln::{
    diagnostics::Position,
    runtime::{BinaryOp, ProgramTables, Runtime, RuntimeConfig, RuntimeResult, Value},
};

fn add(rt: &Runtime, args: &[Value]) -> RuntimeResult<Value> {
    rt.binary_op(BinaryOp::Add, &args[0], &args[1])
}

fn sum4(rt: &Runtime, args: &[Value]) -> RuntimeResult<Value> {
    let mut acc = args[0].clone();
    for arg in &args[1..] {
        acc = rt.binary_op(BinaryOp::Add, &acc, arg)?;
    }
    Ok(acc)
}

fn runtime() -> Runtime {
    let mut builder = ProgramTables::builder();
    builder.add_rust_function("add", 2, add);
    builder.add_rust_function("sum4", 4, sum4);
    Runtime::with_config(Arc::new(builder.build().unwrap()), RuntimeConfig::default())
}

fn bench_apply(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("apply");
    for captured in [0_usize, 2, 4] {
        let closure = rt.box_closure(1, (0..captured as i64).map(|n| rt.box_int(n)).collect());
        let args: Vec<Value> = (0..(4 - captured) as i64).map(|n| rt.box_int(n)).collect();
        group.bench_with_input(BenchmarkId::new("sum4_captured", captured), &args, |b, args| {
            b.iter(|| black_box(rt.apply(&closure, args, Position::default()).unwrap()))
        });
    }
    group.finish();
}

fn bench_select_sugar(c: &mut Criterion) {
    let rt = runtime();
    let add_one = rt.box_closure(0, vec![rt.box_int(1)]);
    let receiver = rt.box_int(41);
    c.bench_function("select_method_sugar", |b| {
        b.iter(|| black_box(rt.select(&receiver, &add_one, Position::default()).unwrap()))
    });
}

criterion_group!(benches, bench_apply, bench_select_sugar);
criterion_main!(benches);
