use criterion::{black_box, criterion_group, criterion_main, Criterion};

use roster_core::statistics::{describe, mode, Histogram};

fn sample(n: usize) -> Vec<u32> {
    (0..n).map(|i| ((i * 7 + i / 3) % 11) as u32).collect()
}

fn bench_describe(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe");

    for n in [10, 1_000, 100_000] {
        let scores = sample(n);
        group.bench_function(format!("n={n}"), |b| b.iter(|| describe(black_box(&scores))));
    }

    group.finish();
}

fn bench_mode_and_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribution");
    let scores = sample(10_000);

    group.bench_function("mode", |b| b.iter(|| mode(black_box(&scores))));
    group.bench_function("histogram", |b| {
        b.iter(|| Histogram::from_scores(black_box(&scores)))
    });

    group.finish();
}

criterion_group!(benches, bench_describe, bench_mode_and_histogram);
criterion_main!(benches);
