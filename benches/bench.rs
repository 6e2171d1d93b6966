use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use lazy_interval_tree::{CategoryId, Interval, IntervalTree};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

struct IntervalGenerator {
    rng: StdRng,
    limit: i64,
}
impl IntervalGenerator {
    fn new() -> Self {
        const LIMIT: i64 = 100_000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> (CategoryId, Interval<i64>) {
        let low = self.rng.gen_range(0..self.limit);
        let high = low + self.rng.gen_range(1..=100);
        (self.rng.gen_range(0..4), Interval::new(low, high))
    }

    /// An edit: a removed range and the length of the text replacing it.
    fn edit(&mut self) -> (i64, i64, i64) {
        let low = self.rng.gen_range(0..self.limit);
        let high = low + self.rng.gen_range(0..10);
        (low, high, self.rng.gen_range(0..10) - (high - low))
    }
}

// insert helper fn
fn interval_tree_insert(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut tree = IntervalTree::new();
        for (id, i) in intervals.clone() {
            tree.insert(id, i, ());
        }
        black_box(tree.len());
    });
}

// insert and remove_and_shift helper fn
fn interval_tree_insert_edit(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    let edits: Vec<_> = std::iter::repeat_with(|| gen.edit()).take(count).collect();
    bench.iter(|| {
        let mut tree = IntervalTree::new();
        for (id, i) in intervals.clone() {
            tree.insert(id, i, ());
        }
        for &(low, high, amount) in &edits {
            tree.remove_and_shift(low, high, amount);
        }
        black_box(tree.len());
    });
}

fn bench_interval_tree_insert(c: &mut Criterion) {
    c.bench_function("bench_interval_tree_insert_100", |b| {
        interval_tree_insert(100, b)
    });
    c.bench_function("bench_interval_tree_insert_1000", |b| {
        interval_tree_insert(1000, b)
    });
    c.bench_function("bench_interval_tree_insert_10,000", |b| {
        interval_tree_insert(10_000, b)
    });
    c.bench_function("bench_interval_tree_insert_100,000", |b| {
        interval_tree_insert(100_000, b)
    });
}

fn bench_interval_tree_insert_edit(c: &mut Criterion) {
    c.bench_function("bench_interval_tree_insert_edit_100", |b| {
        interval_tree_insert_edit(100, b)
    });
    c.bench_function("bench_interval_tree_insert_edit_1000", |b| {
        interval_tree_insert_edit(1000, b)
    });
    c.bench_function("bench_interval_tree_insert_edit_10,000", |b| {
        interval_tree_insert_edit(10_000, b)
    });
}

// find_all_overlap helper fn
fn interval_tree_find_all_overlap(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    let mut tree = IntervalTree::new();
    for (id, i) in intervals.clone() {
        tree.insert(id, i, ());
    }
    bench.iter(|| {
        for (_, i) in &intervals {
            black_box(tree.find_all_overlap(i).len());
        }
    });
}

// iter().filter() helper fn
fn interval_tree_iter_filter(count: usize, bench: &mut Bencher) {
    let mut gen = IntervalGenerator::new();
    let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    let mut tree = IntervalTree::new();
    for (id, i) in intervals.clone() {
        tree.insert(id, i, ());
    }
    bench.iter(|| {
        for (_, i) in &intervals {
            black_box(tree.iter().filter(|v| v.1.overlap(i)).count());
        }
    });
}

fn bench_interval_tree_find_all_overlap(c: &mut Criterion) {
    c.bench_function("bench_interval_tree_find_all_overlap_100", |b| {
        interval_tree_find_all_overlap(100, b)
    });
    c.bench_function("bench_interval_tree_find_all_overlap_1000", |b| {
        interval_tree_find_all_overlap(1000, b)
    });
}

fn bench_interval_tree_iter_filter(c: &mut Criterion) {
    c.bench_function("bench_interval_tree_iter_filter_100", |b| {
        interval_tree_iter_filter(100, b)
    });
    c.bench_function("bench_interval_tree_iter_filter_1000", |b| {
        interval_tree_iter_filter(1000, b)
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_interval_tree_insert, bench_interval_tree_insert_edit,
}

criterion_group! {
    name = benches_query;
    config = criterion_config();
    targets = bench_interval_tree_find_all_overlap, bench_interval_tree_iter_filter
}

criterion_main!(benches_basic_op, benches_query);
