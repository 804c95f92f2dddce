use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use memokit::{fibonacci_lru, fibonacci_splay_keyed, LruCache, RangeSumCache, SplayTree};

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        for key in 0..100u64 {
            cache.put(key, vec![b'x'; 64]);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(cache.get(&(counter % 100)));
            counter += 1;
        });
    });

    group.bench_function("get_miss", |b| {
        let mut cache = LruCache::new(10).unwrap();
        for key in 0..100u64 {
            cache.put(key, vec![b'x'; 64]);
        }

        let mut counter = 0u64;
        b.iter(|| {
            // Only the last ten keys are resident
            black_box(cache.get(&(counter % 90)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_put_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_put");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_with_eviction", |b| {
        let mut cache = LruCache::new(1000).unwrap();
        let mut counter = 0u64;
        b.iter(|| {
            cache.put(counter, counter);
            counter += 1;
        });
    });

    group.finish();
}

fn bench_range_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_sum");
    group.sample_size(20);

    group.bench_function("70_query_30_update", |b| {
        let values: Vec<i64> = (0..10_000).map(|v| v % 100 + 1).collect();
        let mut cache = RangeSumCache::new(values, 1000).unwrap();

        let mut counter = 0usize;
        b.iter(|| {
            let left = (counter * 7919) % 10_000;
            if counter % 10 < 7 {
                let right = left + (counter * 104_729) % (10_000 - left);
                black_box(cache.range_sum(left % 50, right).ok());
            } else {
                black_box(cache.update(left, counter as i64).ok());
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_splay_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("splay_find");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("find_hot_set", |b| {
        let mut tree = SplayTree::new();
        for v in 0..10_000u64 {
            tree.insert((v * 7919) % 10_000);
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(tree.find(&(counter % 16)));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_fibonacci(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci");
    group.sample_size(20);

    group.bench_function("lru_cold_500", |b| {
        b.iter(|| {
            let mut cache = LruCache::new(1024).unwrap();
            black_box(fibonacci_lru(500, &mut cache))
        });
    });

    group.bench_function("splay_cold_500", |b| {
        b.iter(|| {
            let mut tree = SplayTree::new();
            black_box(fibonacci_splay_keyed(500, &mut tree))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_put_evict,
    bench_range_workload,
    bench_splay_find,
    bench_fibonacci
);
criterion_main!(benches);
