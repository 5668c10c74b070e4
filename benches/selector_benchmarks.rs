use std::collections::BTreeSet;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use milim::engine::selector::select_next;
use milim::engine::tally::TallyStore;
use milim::words::{WordPair, WordPool};

fn make_pool(count: usize) -> WordPool {
    WordPool::new(
        (0..count)
            .map(|i| WordPair::new(format!("word{i}"), format!("מילה{i}")))
            .collect(),
    )
    .unwrap()
}

fn bench_select(c: &mut Criterion) {
    let pool = make_pool(500);
    let fresh = BTreeSet::new();
    let mostly_used: BTreeSet<usize> = (0..495).collect();

    c.bench_function("select_next (500 words, none used)", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| select_next(black_box(&pool), black_box(&fresh), &mut rng))
    });

    c.bench_function("select_next (500 words, 5 left)", |b| {
        let mut rng = SmallRng::seed_from_u64(2);
        b.iter(|| select_next(black_box(&pool), black_box(&mostly_used), &mut rng))
    });
}

fn bench_duplicate_texts(c: &mut Criterion) {
    // Every word shares its translation, so distractor search exhausts its attempts.
    let pool = WordPool::new(
        (0..200)
            .map(|i| WordPair::new(format!("word{i}"), "אותו דבר"))
            .collect(),
    )
    .unwrap();
    let used = BTreeSet::new();

    c.bench_function("select_next (200 identical translations)", |b| {
        let mut rng = SmallRng::seed_from_u64(3);
        b.iter(|| select_next(black_box(&pool), black_box(&used), &mut rng))
    });
}

fn bench_difficult_words(c: &mut Criterion) {
    let mut tally = TallyStore::default();
    for i in 0..1000 {
        let word = WordPair::new(format!("word{i}"), format!("מילה{i}"));
        for _ in 0..(i % 4) {
            tally.record(&word, false);
        }
        tally.record(&word, i % 3 == 0);
    }

    c.bench_function("difficult_words (1000 tallies)", |b| {
        b.iter(|| black_box(&tally).difficult_words())
    });
}

criterion_group!(
    benches,
    bench_select,
    bench_duplicate_texts,
    bench_difficult_words
);
criterion_main!(benches);
