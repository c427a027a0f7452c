use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use generic_arith::{
    compose, standard_arithmetic, sum, Arithmetic, Arity, Function, Registry, Value,
};
use std::sync::Arc;

fn square() -> Value {
    Value::from(Function::named("square", Arity::Exactly(1), |arith, args| {
        arith.square(&args[0])
    }))
}

/// Identity short-circuit against a full table lookup for the same call shape
fn bench_resolution_tiers(c: &mut Criterion) {
    let arith = standard_arithmetic().unwrap();
    let mut group = c.benchmark_group("resolution");

    let shortcut = [Value::Integer(0), Value::Integer(17)];
    let table = [Value::Integer(5), Value::Integer(17)];
    let mixed = [Value::Integer(5), Value::Float(0.25)];

    group.bench_function("identity_shortcut", |b| {
        b.iter(|| arith.add(black_box(&shortcut)))
    });
    group.bench_function("table_hit", |b| b.iter(|| arith.add(black_box(&table))));
    group.bench_function("table_hit_mixed", |b| b.iter(|| arith.add(black_box(&mixed))));
    group.finish();
}

/// Variadic reduction cost as the argument list grows
fn bench_reduction(c: &mut Criterion) {
    let arith = standard_arithmetic().unwrap();
    let mut group = c.benchmark_group("reduction");
    for size in [2usize, 8, 64, 512] {
        let args: Vec<Value> = (1..=size as i64).map(Value::Integer).collect();
        group.bench_with_input(BenchmarkId::new("add", size), &args, |b, args| {
            b.iter(|| arith.add(black_box(args)))
        });
    }
    group.finish();
}

/// Shortcut disabled: every identity call goes to the table
fn bench_shortcut_disabled(c: &mut Criterion) {
    let registry = Registry::builder().with_identity_shortcut(false).build();
    generic_arith::install_standard_modules(&registry).unwrap();
    let arith = Arithmetic::new(Arc::new(registry));
    let args = [Value::Integer(0), Value::Integer(17)];
    c.bench_function("resolution/no_shortcut", |b| {
        b.iter(|| arith.add(black_box(&args)))
    });
}

fn bench_combinators(c: &mut Criterion) {
    let arith = standard_arithmetic().unwrap();
    let mut group = c.benchmark_group("combinators");
    group.bench_function("sum_square_1_100", |b| {
        let f = square();
        b.iter(|| sum(&arith, black_box(&f), 1, 100))
    });
    let composed = compose(&[square(), square(), square()]).unwrap();
    group.bench_function("compose_depth_3", |b| {
        b.iter(|| arith.apply(&composed, black_box(&[Value::Integer(3)])))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_resolution_tiers,
    bench_reduction,
    bench_shortcut_disabled,
    bench_combinators
);
criterion_main!(benches);
