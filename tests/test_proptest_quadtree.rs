//! Property-based tests for the point-region quadtree.

use pointregion::geometry::{Frame, Point};
use pointregion::quadtree::Quadtree;
use proptest::prelude::*;

prop_compose! {
    fn arb_point_in_domain()(x in 0.0..0.999, y in 0.0..0.999) -> Point {
        Point::new(x, y)
    }
}

proptest! {
    #[test]
    fn test_quadtree_insert_point_is_its_own_nearest(
        points in prop::collection::vec(arb_point_in_domain(), 1..40)
    ) {
        let mut tree: Quadtree<usize> = Quadtree::new();
        for (i, point) in points.iter().enumerate() {
            // Duplicate coordinates are allowed; only the first insertion need stick as
            // the nearest result, so skip exact repeats.
            let _ = tree.insert(*point, i);
        }

        for point in &points {
            let nearest = tree.nearest(*point).expect("tree is non-empty");
            prop_assert!(nearest.position.distance_to(point) < 1e-9);
        }
    }

    #[test]
    fn test_quadtree_query_range_matches_brute_force(
        points in prop::collection::vec(arb_point_in_domain(), 0..60)
    ) {
        let mut tree: Quadtree<usize> = Quadtree::new();
        for (i, point) in points.iter().enumerate() {
            tree.insert(*point, i).unwrap();
        }

        let rect = Frame::new(Point::new(0.25, 0.75), Point::new(0.75, 0.25));
        let mut expected: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| rect.contains(p))
            .map(|(i, _)| i)
            .collect();
        expected.sort_unstable();

        let mut actual: Vec<usize> = tree.query_range(rect).into_iter().map(|nd| nd.payload).collect();
        actual.sort_unstable();

        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn test_quadtree_query_disk_contains_only_points_within_radius(
        points in prop::collection::vec(arb_point_in_domain(), 0..60),
        radius in 0.01..0.3,
    ) {
        let mut tree: Quadtree<usize> = Quadtree::new();
        for (i, point) in points.iter().enumerate() {
            tree.insert(*point, i).unwrap();
        }

        let center = Point::new(0.5, 0.5);
        for nd in tree.query_disk(center, radius) {
            prop_assert!(nd.position.distance_to(&center) <= radius + 1e-9);
        }
    }

    #[test]
    fn test_quadtree_insert_bulk_accepts_exactly_in_domain_points(
        points in prop::collection::vec(arb_point_in_domain(), 0..60)
    ) {
        let labeled: Vec<(Point, usize)> = points.iter().cloned().enumerate().map(|(i, p)| (p, i)).collect();
        let mut tree: Quadtree<usize> = Quadtree::new();
        let inserted = tree.insert_bulk(&labeled);
        prop_assert_eq!(inserted, points.len());
        prop_assert_eq!(tree.len(), points.len());
    }
}
