use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use split_interval_map::IntervalMap;
use std::hint::black_box;

struct IntervalGenerator {
    rng: StdRng,
    limit: i64,
}
impl IntervalGenerator {
    fn new(limit: i64) -> Self {
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit,
        }
    }

    fn next(&mut self, width: i64) -> (i64, i64) {
        let from = self.rng.gen_range(0..self.limit);
        let to = self.rng.gen_range(from + 1..=from + width);
        (from, to)
    }
}

fn disjoint(count: usize) -> Vec<(i64, i64)> {
    let mut rng = StdRng::from_seed([0; 32]);
    let mut ranges: Vec<_> = (0..count as i64).map(|i| (i * 10, i * 10 + 5)).collect();
    for i in (1..ranges.len()).rev() {
        ranges.swap(i, rng.gen_range(0..=i));
    }
    ranges
}

// disjoint insert helper fn
fn interval_map_add_disjoint(count: usize, bench: &mut Bencher) {
    let ranges = disjoint(count);
    bench.iter(|| {
        let mut map = IntervalMap::new();
        for &(from, to) in &ranges {
            black_box(map.add(from, to, ()).unwrap());
        }
    });
}

// overlapping insert helper fn
fn interval_map_add_overlapping(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new(count as i64 * 10);
    let ranges: Vec<_> = std::iter::repeat_with(|| gen.next(40))
        .take(count)
        .collect();
    bench.iter(|| {
        let mut map = IntervalMap::new();
        for &(from, to) in &ranges {
            black_box(map.add(from, to, ()).unwrap());
        }
    });
}

// insert and remove helper fn
fn interval_map_add_remove(count: usize, bench: &mut Bencher) {
    let ranges = disjoint(count);
    bench.iter(|| {
        let mut map = IntervalMap::new();
        for &(from, to) in &ranges {
            black_box(map.add(from, to, ()).unwrap());
        }
        for &(from, _) in &ranges {
            black_box(map.remove_range(from));
        }
    });
}

// lookup helper fn
fn interval_map_get(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new(count as i64 * 10);
    let mut map = IntervalMap::new();
    for _ in 0..count {
        let (from, to) = gen.next(40);
        map.add(from, to, ()).unwrap();
    }
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next(1).0)
        .take(count)
        .collect();
    bench.iter(|| {
        for &key in &keys {
            black_box(map.get(key));
        }
    });
}

fn bench_interval_map_add(c: &mut Criterion) {
    c.bench_function("bench_interval_map_add_disjoint_1000", |b| {
        interval_map_add_disjoint(1000, b)
    });
    c.bench_function("bench_interval_map_add_disjoint_100,000", |b| {
        interval_map_add_disjoint(100_000, b)
    });
    c.bench_function("bench_interval_map_add_overlapping_1000", |b| {
        interval_map_add_overlapping(1000, b)
    });
    c.bench_function("bench_interval_map_add_overlapping_10,000", |b| {
        interval_map_add_overlapping(10_000, b)
    });
}

fn bench_interval_map_add_remove(c: &mut Criterion) {
    c.bench_function("bench_interval_map_add_remove_1000", |b| {
        interval_map_add_remove(1000, b)
    });
    c.bench_function("bench_interval_map_add_remove_100,000", |b| {
        interval_map_add_remove(100_000, b)
    });
}

fn bench_interval_map_get(c: &mut Criterion) {
    c.bench_function("bench_interval_map_get_1000", |b| {
        interval_map_get(1000, b)
    });
    c.bench_function("bench_interval_map_get_100,000", |b| {
        interval_map_get(100_000, b)
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_interval_map_add, bench_interval_map_add_remove,
}

criterion_group! {
    name = benches_lookup;
    config = criterion_config();
    targets = bench_interval_map_get
}

criterion_main!(benches_basic_op, benches_lookup);
