use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rowsql::{Compiler, Fields, Wrapped, literal, op};

/// `n` columns mixing plain, literal and operator values.
fn build_fields(n: usize) -> Fields {
    (0..n)
        .map(|i| {
            let column = format!("col{i}");
            let value: Wrapped = match i % 3 {
                0 => (i as i64).into(),
                1 => literal("NOW()").into(),
                _ => op(">=", i as i64).into(),
            };
            (column, value)
        })
        .collect()
}

fn bench_update(c: &mut Criterion) {
    let compiler = Compiler::default();
    let mut group = c.benchmark_group("compile/update");

    for n in [1, 5, 10, 50, 100] {
        let values = build_fields(n);
        let where_ = build_fields(n);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(values, where_),
            |b, (values, where_)| {
                b.iter(|| black_box(compiler.update("t", values, where_)));
            },
        );
    }

    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let compiler = Compiler::default();
    let mut group = c.benchmark_group("compile/select");

    for n in [1, 5, 10, 50] {
        let where_ = build_fields(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &where_, |b, where_| {
            b.iter(|| black_box(compiler.select("t", where_)));
        });
    }

    group.finish();
}

fn bench_build_and_compile(c: &mut Criterion) {
    let compiler = Compiler::default();
    let mut group = c.benchmark_group("compile/build_and_compile");

    for n in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let values = build_fields(n);
                black_box(compiler.insert("t", &values));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_select, bench_build_and_compile);
criterion_main!(benches);
