//! Write batch benchmarks.

use batchlog_bench::{build_put_batch, generate_pairs, random_data};
use batchlog_core::WriteBatch;
use batchlog_storage::{InMemoryEngine, WriteOptions};
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

/// Benchmark appending puts of varying value size.
fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_put");

    for size in [16, 256, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let value = random_data(size);
            let mut batch = WriteBatch::new();

            b.iter(|| {
                if batch.size_in_bytes() > 1 << 20 {
                    batch.clear();
                }
                batch.put(black_box(b"key-000000000001"), black_box(&value));
            });
        });
    }

    group.finish();
}

/// Benchmark building a whole batch from scratch.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_build");

    for count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let pairs = generate_pairs(count, 64);
            b.iter(|| {
                let batch = build_put_batch(black_box(&pairs));
                black_box(batch);
            });
        });
    }

    group.finish();
}

/// Benchmark decoding every record through the iterator.
fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_iterate");

    for count in [10, 100, 1000].iter() {
        let batch = build_put_batch(&generate_pairs(*count, 64));
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &batch, |b, batch| {
            b.iter(|| {
                let mut iter = batch.new_iterator();
                let mut decoded = 0usize;
                while iter.advance() {
                    decoded += 1;
                }
                black_box(decoded);
            });
        });
    }

    group.finish();
}

/// Benchmark full verification of serialized bytes.
fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_verify");

    for count in [100, 1000].iter() {
        let data = build_put_batch(&generate_pairs(*count, 64)).into_bytes();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| {
                let batch = WriteBatch::from_bytes(black_box(data));
                batch.verify().unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark handing batches to the in-memory engine.
fn bench_submit(c: &mut Criterion) {
    let batch = build_put_batch(&generate_pairs(100, 64));
    let options = WriteOptions::default();

    c.bench_function("batch_submit_100", |b| {
        b.iter_batched(
            InMemoryEngine::new,
            |mut engine| {
                let seq = batch.submit(&mut engine, &options).unwrap();
                black_box(seq);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_put,
    bench_build,
    bench_iterate,
    bench_verify,
    bench_submit
);
criterion_main!(benches);
