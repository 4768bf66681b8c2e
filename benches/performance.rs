use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use growvec::GrowVec;

fn bench_sequential_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_push");

    for size in [10, 100, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("from_empty", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::new();
                for i in 0..size {
                    vec.push(black_box(i)).unwrap();
                }
                black_box(vec.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("reserved", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::with_capacity(size).unwrap();
                for i in 0..size {
                    vec.push(black_box(i)).unwrap();
                }
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("try_get", size), size, |b, &size| {
            let vec: GrowVec<usize> = (0..size).collect();

            b.iter(|| {
                for i in 0..size {
                    black_box(vec.try_get((i * 7) % size).unwrap());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("index", size), size, |b, &size| {
            let vec: GrowVec<usize> = (0..size).collect();

            b.iter(|| {
                for i in 0..size {
                    black_box(vec[(i * 7) % size]);
                }
            });
        });
    }
    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("forward", size), size, |b, &size| {
            let vec: GrowVec<u64> = (0..size as u64).collect();

            b.iter(|| black_box(&vec).iter().sum::<u64>());
        });
        group.bench_with_input(BenchmarkId::new("reverse", size), size, |b, &size| {
            let vec: GrowVec<u64> = (0..size as u64).collect();

            b.iter(|| black_box(&vec).iter_rev().sum::<u64>());
        });
    }
    group.finish();
}

fn bench_stack_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("push_pop_cycle", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::new();

                for i in 0..size {
                    vec.push(format!("element_{i}")).unwrap();
                }

                for _ in 0..size {
                    black_box(vec.pop());
                }
            });
        });
    }
    group.finish();
}

fn bench_positional(c: &mut Criterion) {
    let mut group = c.benchmark_group("positional");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("insert_front", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::new();
                for i in 0..size {
                    vec.insert(0, black_box(i)).unwrap();
                }
                black_box(vec.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("insert_n_middle", size), size, |b, &size| {
            let base: GrowVec<u32> = (0..size as u32).collect();

            b.iter(|| {
                let mut vec = base.clone();
                vec.insert_n(size / 2, size, &7).unwrap();
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_push,
    bench_random_access,
    bench_iteration,
    bench_stack_operations,
    bench_positional
);
criterion_main!(benches);
