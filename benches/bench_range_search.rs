use shared::*;

use criterion::{black_box, criterion_group, Criterion};
use pointregion::geometry::{Frame, Point};
use pointregion::node::NodeData;
use pointregion::quadtree::Quadtree;
use tracing::info;

/// A generic helper function for range/disk search benchmarks.
///
/// The lifetime `'a` ties the lifetime of the tree reference to the return value, since the
/// search closure may hand back borrowed data.
fn bench_search<'a, Q, R>(
    name: &str,
    tree: &'a Quadtree<i32>,
    query: &Q,
    search_fn: impl Fn(&'a Quadtree<i32>, &Q) -> R,
    cc: &mut Criterion,
) where
    R: 'a,
{
    cc.bench_function(name, |b| {
        b.iter(|| {
            info!("running search benchmark: {}", name);
            let res = search_fn(tree, query);
            info!("completed search benchmark: {}", name);
            black_box(res)
        })
    });
}

fn benchmark_query_range(_c: &mut Criterion) {
    info!("setting up benchmark_query_range");
    let points = generate_points(BENCH_NUM_INSERT);
    let mut tree: Quadtree<i32> = Quadtree::new();
    tree.insert_bulk(&points);

    let query_rect = Frame::new(Point::new(0.25, 0.75), Point::new(0.75, 0.25));
    let mut cc = configure_criterion();
    bench_search(
        "range_quadtree",
        &tree,
        &query_rect,
        |t, q: &Frame| -> Vec<NodeData<i32>> { t.query_range(*q) },
        &mut cc,
    );
}

fn benchmark_query_disk(_c: &mut Criterion) {
    info!("setting up benchmark_query_disk");
    let points = generate_points(BENCH_NUM_INSERT);
    let mut tree: Quadtree<i32> = Quadtree::new();
    tree.insert_bulk(&points);

    let query_point = Point::new(0.5, 0.5);
    let mut cc = configure_criterion();
    bench_search(
        "disk_quadtree",
        &tree,
        &query_point,
        |t, q: &Point| -> Vec<NodeData<i32>> { t.query_disk(*q, BENCH_QUERY_RADIUS) },
        &mut cc,
    );
}

fn benchmark_nearest(_c: &mut Criterion) {
    info!("setting up benchmark_nearest");
    let points = generate_points(BENCH_NUM_INSERT);
    let mut tree: Quadtree<i32> = Quadtree::new();
    tree.insert_bulk(&points);

    let query_point = Point::new(0.5, 0.5);
    let mut cc = configure_criterion();
    bench_search(
        "nearest_quadtree",
        &tree,
        &query_point,
        |t, q: &Point| -> Option<NodeData<i32>> { t.nearest(*q) },
        &mut cc,
    );
}

criterion_group!(
    benches,
    benchmark_query_range,
    benchmark_query_disk,
    benchmark_nearest,
);
