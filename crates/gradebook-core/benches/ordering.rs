use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradebook_core::store::{RecordInput, StoreLimits};
use gradebook_core::{RecordStore, SortKey, SortOrder};

fn full_store(students: usize, courses: usize) -> RecordStore {
    let limits = StoreLimits {
        max_students: students,
        max_courses: courses,
        ..StoreLimits::default()
    };
    let entries: Vec<RecordInput> = (0..students)
        .map(|i| {
            let scores = (0..courses)
                .map(|c| ((i * 37 + c * 11) % 101) as f64)
                .collect();
            RecordInput::new(10_000 - i as i64, format!("s{:04}", (i * 7919) % students), scores)
        })
        .collect();
    let mut store = RecordStore::with_limits(limits);
    store
        .bulk_load(courses, &entries)
        .expect("bench data is valid");
    store
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for (label, students) in [("30", 30), ("1000", 1000)] {
        let store = full_store(students, 6);

        group.bench_function(format!("total_desc/{label}"), |b| {
            b.iter_batched(
                || store.clone(),
                |mut s| s.sort_by(black_box(SortKey::Total), SortOrder::Descending),
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("id/{label}"), |b| {
            b.iter_batched(
                || store.clone(),
                |mut s| s.sort_by_id(),
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("name/{label}"), |b| {
            b.iter_batched(
                || store.clone(),
                |mut s| s.sort_by_name(),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    let store = full_store(1000, 6);

    group.bench_function("course_statistics/1000x6", |b| {
        b.iter_batched(
            || store.clone(),
            |mut s| s.recompute_course_statistics(),
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("record_scores/1000x6", |b| {
        b.iter_batched(
            || store.clone(),
            |mut s| s.recompute_record_scores(),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_sort, bench_statistics);
criterion_main!(benches);
