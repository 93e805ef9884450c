//! Benchmarks for edgestore log operations

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use serde::{Deserialize, Serialize};

use edgestore::{Config, SequentialStore, StoreBackend, StoreProvider};

#[derive(Serialize, Deserialize)]
struct Message {
    device_id: u32,
    payload: Vec<u8>,
}

fn fresh_store(name: &str) -> (StoreProvider, SequentialStore<Message>) {
    let config = Config::builder().backend(StoreBackend::InMemory).build();
    let provider = StoreProvider::open(&config).unwrap();
    let store = provider.get_sequential_store::<Message>(name).unwrap();
    (provider, store)
}

fn sample_message() -> Message {
    Message {
        device_id: 42,
        payload: vec![0xAB; 256],
    }
}

fn append_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");
    group.throughput(Throughput::Elements(1));

    group.bench_function("memory_256b", |b| {
        let (_provider, store) = fresh_store("bench_append");
        let message = sample_message();
        b.iter(|| store.append(&message).unwrap());
    });

    group.finish();
}

fn get_batch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_batch");

    let (_provider, store) = fresh_store("bench_read");
    let message = sample_message();
    for _ in 0..10_000 {
        store.append(&message).unwrap();
    }

    for batch_size in [1usize, 100, 1000] {
        group.throughput(Throughput::Elements(batch_size as u64));
        group.bench_function(BenchmarkId::new("memory", batch_size), |b| {
            b.iter(|| store.get_batch(0, batch_size).unwrap());
        });
    }

    group.finish();
}

fn trim_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_first");
    group.throughput(Throughput::Elements(1));

    group.bench_function("memory_256b", |b| {
        let message = sample_message();
        b.iter_batched(
            || {
                let (provider, store) = fresh_store("bench_trim");
                for _ in 0..64 {
                    store.append(&message).unwrap();
                }
                (provider, store)
            },
            |(_provider, store)| {
                while store.remove_first(|_, _| true).unwrap() {}
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, append_benchmark, get_batch_benchmark, trim_benchmark);
criterion_main!(benches);
