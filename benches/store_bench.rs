//! Benchmarks for SlotDB store operations

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use slotdb::{Movie, Store};
use tempfile::TempDir;

fn movie(id: i64) -> Movie {
    Movie {
        id,
        title: format!("Movie number {}", id),
        director: "Some Director".to_string(),
        year: 1950 + (id % 70) as i32,
        genre: "Drama".to_string(),
        duration: 80 + (id % 60) as u32,
        cast: "First Actor, Second Actor, Third Actor".to_string(),
    }
}

fn filled_store(dir: &TempDir, count: i64) -> Store<Movie> {
    let mut store = Store::<Movie>::create(&dir.path().join("bench.dat")).unwrap();
    for id in 0..count {
        store.insert(&movie(id)).unwrap();
    }
    store
}

fn store_benchmarks(c: &mut Criterion) {
    c.bench_function("insert_100_append", |b| {
        b.iter_batched(
            || TempDir::new().unwrap(),
            |dir| filled_store(&dir, 100),
            BatchSize::PerIteration,
        )
    });

    c.bench_function("lookup_with_warm_index", |b| {
        let dir = TempDir::new().unwrap();
        let mut store = filled_store(&dir, 1_000);
        let mut key = 0;
        b.iter(|| {
            key = (key + 7) % 1_000;
            store.lookup(key).unwrap()
        })
    });

    c.bench_function("delete_reinsert_churn", |b| {
        let dir = TempDir::new().unwrap();
        let mut store = filled_store(&dir, 500);
        let mut key = 0;
        b.iter(|| {
            key = (key + 13) % 500;
            store.delete(key).unwrap();
            store.insert(&movie(key)).unwrap()
        })
    });

    c.bench_function("compact_after_deletes", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().unwrap();
                let mut store = filled_store(&dir, 200);
                for key in (0..200).step_by(3) {
                    store.delete(key).unwrap();
                }
                (dir, store)
            },
            |(_dir, mut store)| store.compact().unwrap(),
            BatchSize::PerIteration,
        )
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
