use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferroframe::{Column, FilterOp, PrimitiveType, Value};

fn bench_column_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_append");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut col = Column::new("bench".to_string(), PrimitiveType::Int);
                for i in 0..size {
                    col.append(black_box(Value::Int(i))).unwrap();
                }
            });
        });
    }
    group.finish();
}

fn bench_column_append_from_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_append_from_string");

    for size in [100, 1000, 10000].iter() {
        let raw: Vec<String> = (0..*size).map(|i| i.to_string()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut col = Column::new("bench".to_string(), PrimitiveType::Int64);
                for s in &raw {
                    col.append_from_string(black_box(s)).unwrap();
                }
            });
        });
    }
    group.finish();
}

fn bench_column_mean(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_mean");

    for size in [100, 1000, 10000].iter() {
        let col = Column::from_floats("bench".to_string(), (0..*size).map(|i| i as f64).collect());
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| col.mean().unwrap());
        });
    }
    group.finish();
}

fn bench_column_std_dev(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_std_dev");

    for size in [100, 1000, 10000].iter() {
        let col = Column::from_floats("bench".to_string(), (0..*size).map(|i| i as f64).collect());
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| col.std_dev().unwrap());
        });
    }
    group.finish();
}

fn bench_column_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_filter");

    for size in [100, 1000, 10000].iter() {
        let col = Column::from_ints("bench".to_string(), (0..*size).collect());
        let probe = Value::Int(size / 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| col.filter(FilterOp::GreaterEq, black_box(&probe)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_column_append,
    bench_column_append_from_string,
    bench_column_mean,
    bench_column_std_dev,
    bench_column_filter
);
criterion_main!(benches);
