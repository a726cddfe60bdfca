use shared::*;

use criterion::{criterion_group, Criterion};
use pointregion::quadtree::Quadtree;
use std::hint::black_box;

fn bench_insert_bulk_quadtree(_c: &mut Criterion) {
    let points = generate_points(BENCH_NUM_INSERT);
    let mut cc = configure_criterion();
    cc.bench_function("insert_bulk_quadtree", |b| {
        b.iter_with_setup(
            || {
                let tree: Quadtree<i32> = Quadtree::new();
                (tree, points.clone())
            },
            |(mut tree, points)| {
                black_box(tree.insert_bulk(&points));
            },
        )
    });
}

criterion_group!(benches, bench_insert_bulk_quadtree);
