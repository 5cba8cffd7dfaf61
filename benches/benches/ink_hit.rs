// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use folio_annotation::{InkAnnotation, segment_hit};
use kurbo::{Line, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A scribble of `strokes` random walks with `points` points each.
fn gen_scribble(strokes: usize, points: usize, seed: u64) -> Vec<Vec<Point>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..strokes)
        .map(|_| {
            let mut p = Point::new(rng.random_range(50.0..550.0), rng.random_range(50.0..740.0));
            (0..points)
                .map(|_| {
                    p.x = (p.x + rng.random_range(-4.0..4.0)).clamp(0.0, 612.0);
                    p.y = (p.y + rng.random_range(-4.0..4.0)).clamp(0.0, 792.0);
                    p
                })
                .collect()
        })
        .collect()
}

fn bench_ink(c: &mut Criterion) {
    let paths = gen_scribble(32, 256, 3);
    let segments = paths.iter().map(|p| p.len() - 1).sum::<usize>();

    let mut group = c.benchmark_group("ink");
    group.throughput(Throughput::Elements(segments as u64));
    group.bench_function("rebuild_index", |b| {
        b.iter(|| {
            let mut ink = InkAnnotation::new(0);
            let _ = ink.set_width(3.0).unwrap();
            let _ = ink.set_paths(paths.clone()).unwrap();
            black_box(ink)
        });
    });

    let mut ink = InkAnnotation::new(0);
    let _ = ink.set_width(3.0).unwrap();
    let _ = ink.set_paths(paths.clone()).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let probes: Vec<Point> = paths
        .iter()
        .flatten()
        .step_by(7)
        .map(|p| Point::new(p.x + rng.random_range(-2.0..2.0), p.y + rng.random_range(-2.0..2.0)))
        .collect();

    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("is_hit_indexed", |b| {
        b.iter(|| probes.iter().filter(|&&p| ink.is_hit(p)).count());
    });
    group.bench_function("is_hit_linear_scan", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|&&p| {
                    paths.iter().any(|path| {
                        path.windows(2)
                            .any(|w| segment_hit(Line::new(w[0], w[1]), 1.5, p))
                    })
                })
                .count()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_ink);
criterion_main!(benches);
