#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::{collections::HashMap, hint::black_box};

use chainmap::ChainedHashMap;
use criterion::{Criterion, criterion_group, criterion_main};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_map_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec(any::<(String, String)>(), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash map comparison benchmark");
    group.sample_size(SAMPLE_SIZE);

    group.bench_function("chained insert", |b| {
        b.iter(|| {
            let mut map = ChainedHashMap::new();
            for (key, value) in items.clone() {
                map.insert(key, value);
            }
            black_box(map)
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (key, value) in items.clone() {
                map.insert(key, value);
            }
            black_box(map)
        });
    });

    let chained_map: ChainedHashMap<_, _> = items.iter().cloned().collect();
    let rust_map: HashMap<_, _> = items.iter().cloned().collect();

    group.bench_function("chained get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(chained_map.get(key));
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                black_box(rust_map.get(key));
            }
        });
    });
    group.bench_function("chained remove and reinsert", |b| {
        let mut map = chained_map.clone();
        b.iter(|| {
            for (key, value) in &items {
                if let Some(old) = map.remove(key) {
                    map.insert(key.clone(), old);
                } else {
                    map.insert(key.clone(), value.clone());
                }
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_map_benches);

criterion_main!(benches);
