use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradebook_core::codec::{decode, encode};
use gradebook_core::store::{RecordInput, StoreLimits};
use gradebook_core::RecordStore;

fn sample_store() -> RecordStore {
    let entries: Vec<RecordInput> = (0..30)
        .map(|i| {
            let scores = (0..6).map(|c| 50.0 + ((i * 13 + c * 7) % 50) as f64).collect();
            RecordInput::new(1000 + i as i64, format!("student{i}"), scores)
        })
        .collect();
    let mut store = RecordStore::new();
    store.bulk_load(6, &entries).expect("bench data is valid");
    store
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let store = sample_store();
    let text = encode(&store);

    group.bench_function("encode/30x6", |b| b.iter(|| encode(black_box(&store))));

    group.bench_function("decode/30x6", |b| {
        b.iter(|| decode(black_box(&text), StoreLimits::default()))
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
