use btree_map::BTreeMap;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeMap as StdBTreeMap;

const SIZE: u64 = 10_000;

/// Spread keys over the range so inserts do not always hit the rightmost leaf.
fn scrambled(i: u64) -> u64 {
    i.wrapping_mul(0x9E37_79B9_7F4A_7C15) % (SIZE * 16)
}

fn filled<const B: usize>() -> BTreeMap<u64, u64, B> {
    let mut map = BTreeMap::new();
    for i in 0..SIZE {
        map.insert(scrambled(i), i);
    }
    map
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Insert");

    group.bench_function("std_btree_map_insert", |b| {
        b.iter(|| {
            let mut map = StdBTreeMap::new();
            for i in 0..SIZE {
                map.insert(black_box(scrambled(i)), black_box(i));
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("btree_map_insert", 3), |b| {
        b.iter(|| {
            let mut map: BTreeMap<u64, u64, 3> = BTreeMap::new();
            for i in 0..SIZE {
                map.insert(black_box(scrambled(i)), black_box(i));
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("btree_map_insert", 6), |b| {
        b.iter(|| {
            let mut map: BTreeMap<u64, u64, 6> = BTreeMap::new();
            for i in 0..SIZE {
                map.insert(black_box(scrambled(i)), black_box(i));
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("btree_map_insert", 32), |b| {
        b.iter(|| {
            let mut map: BTreeMap<u64, u64, 32> = BTreeMap::new();
            for i in 0..SIZE {
                map.insert(black_box(scrambled(i)), black_box(i));
            }
            map
        });
    });

    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Find");

    let std_map: StdBTreeMap<u64, u64> = (0..SIZE).map(|i| (scrambled(i), i)).collect();
    group.bench_function("std_btree_map_get", |b| {
        b.iter(|| {
            for i in 0..SIZE {
                black_box(std_map.get(&scrambled(i)));
            }
        });
    });

    let map = filled::<6>();
    group.bench_function("btree_map_get", |b| {
        b.iter(|| {
            for i in 0..SIZE {
                black_box(map.get(&scrambled(i)));
            }
        });
    });

    group.bench_function("btree_map_find", |b| {
        b.iter(|| {
            for i in 0..SIZE {
                black_box(map.find(&scrambled(i)));
            }
        });
    });

    group.finish();
}

fn bench_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Erase");

    group.bench_function(BenchmarkId::new("btree_map_drain", 3), |b| {
        b.iter_batched(
            filled::<3>,
            |mut map| {
                for i in 0..SIZE {
                    black_box(map.erase(&scrambled(i)));
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("btree_map_drain", 6), |b| {
        b.iter_batched(
            filled::<6>,
            |mut map| {
                for i in 0..SIZE {
                    black_box(map.erase(&scrambled(i)));
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_find, bench_erase);
criterion_main!(benches);
