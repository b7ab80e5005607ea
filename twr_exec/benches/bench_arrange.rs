//! # Arranger Benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use twr_lib::nav::{Navigator, Params};

fn arrange_benchmark(c: &mut Criterion) {
    // ---- Build a long zig-zag path ----

    let raw: Vec<(f64, f64)> = (0..1000)
        .map(|i| {
            let x = i as f64 * 2.0;
            let y = if i % 2 == 0 { 0.0 } else { 3.0 };
            (x, y)
        })
        .collect();

    let points = Navigator::to_points(&raw);
    let translations = Navigator::to_translations(&points).unwrap();

    let filleted = Navigator::new(Params::default());
    let on_the_spot = Navigator::new(Params {
        corner_radius_m: 0.0,
        ..Params::default()
    });

    c.bench_function("Navigator::arrange_translations::fillet", |b| {
        b.iter(|| filleted.arrange_translations(&translations).unwrap())
    });

    c.bench_function("Navigator::arrange_translations::on_the_spot", |b| {
        b.iter(|| on_the_spot.arrange_translations(&translations).unwrap())
    });

    c.bench_function("Navigator::compute_motions", |b| {
        b.iter(|| filleted.compute_motions(&raw).unwrap())
    });
}

criterion_group!(benches, arrange_benchmark);
criterion_main!(benches);
