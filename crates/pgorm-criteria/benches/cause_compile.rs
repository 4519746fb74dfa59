use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgorm_criteria::prelude::*;
use pgorm_criteria::{Scope, criteria};

/// Build a cause with `n` AND-joined comparisons and one OR group:
/// col0 = ? and col1 = ? ... or ( tail = ? )
fn build_cause(n: usize) -> Cause {
    let mut cause = Cause::new();
    for i in 0..n {
        cause = cause.eq(&format!("col{i}"), i as i64);
    }
    cause
        .or(criteria::eq("tail", -1i64))
        .desc(["created_at"])
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("cause/compile");

    for n in [1, 5, 10, 50, 100] {
        let cause = build_cause(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &cause, |b, cause| {
            b.iter(|| black_box(cause.compile()));
        });
    }

    group.finish();
}

fn bench_build_and_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("cause/build_and_compile");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_cause(n).compile()));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("cause/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let cause = criteria::in_list("id", values.iter().copied());
                black_box(cause.compile())
            });
        });
    }

    group.finish();
}

fn bench_nested_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("cause/nested_groups");

    for depth in [1, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut cause = criteria::eq("leaf", 0i32);
                for i in 0..depth {
                    cause = criteria::eq("level", i as i32).and([cause, criteria::gt("x", 1i32)]);
                }
                black_box(Scope::new("t").query_and_order(&cause))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compile,
    bench_build_and_compile,
    bench_in_list,
    bench_nested_groups
);
criterion_main!(benches);
