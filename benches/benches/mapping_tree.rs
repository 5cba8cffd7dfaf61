// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use folio_mapping::{Aabb2D, MappingTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PAGE: Aabb2D = Aabb2D::new(0.0, 0.0, 612.0, 792.0);

fn gen_grid_rects(n: usize) -> Vec<Aabb2D> {
    let (cw, ch) = (PAGE.width() / n as f64, PAGE.height() / n as f64);
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Aabb2D::from_xywh(x as f64 * cw, y as f64 * ch, cw, ch));
        }
    }
    out
}

/// Boxes with sizes spread over several orders of magnitude, like glyphs, links and strokes.
fn gen_random_rects(count: usize, seed: u64) -> Vec<Aabb2D> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let w = PAGE.width() * rng.random_range(0.0005..0.2);
            let h = PAGE.height() * rng.random_range(0.0005..0.2);
            let x = rng.random_range(0.0..PAGE.width() - w - 1.0);
            let y = rng.random_range(0.0..PAGE.height() - h - 1.0);
            Aabb2D::from_xywh(x, y, w, h)
        })
        .collect()
}

fn build(rects: &[Aabb2D]) -> MappingTree<usize> {
    let mut tree = MappingTree::new(0, PAGE).unwrap();
    for (i, r) in rects.iter().enumerate() {
        let _ = tree.add(i, *r, *r).unwrap();
    }
    tree
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for &n in &[16_usize, 64] {
        let rects = gen_grid_rects(n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{n}"), |b| {
            b.iter(|| black_box(build(&rects)));
        });
    }
    let rects = gen_random_rects(4_096, 7);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("random_4096", |b| {
        b.iter(|| black_box(build(&rects)));
    });
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    let rects = gen_random_rects(4_096, 11);
    let tree = build(&rects);
    let mut rng = StdRng::seed_from_u64(13);
    let points: Vec<(f64, f64)> = (0..1_024)
        .map(|_| (rng.random_range(0.0..=PAGE.max_x), rng.random_range(0.0..=PAGE.max_y)))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("random_points", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for &(x, y) in &points {
                if tree.get(x, y).unwrap().is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        });
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    let rects = gen_random_rects(4_096, 17);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("all_oldest_first", |b| {
        b.iter_batched(
            || build(&rects),
            |mut tree| {
                for i in 0..rects.len() {
                    tree.remove(&i).unwrap();
                }
                black_box(tree)
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_add, bench_get, bench_remove);
criterion_main!(benches);
