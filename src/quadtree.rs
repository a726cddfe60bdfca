//! ## Quadtree facade
//!
//! This module ties the arena of [`Node`]s together into the public [`Quadtree`] type: a root
//! spanning a configurable domain, dispatch for single and bulk inserts, the relative-neighbor
//! powered [`Quadtree::nearest`] query, an expanding-disk fallback, rectangle/disk range queries,
//! and a Graphviz drawing hook for debugging.
//!
//! ### Example
//!
//! ```
//! use pointregion::geometry::Point;
//! use pointregion::quadtree::Quadtree;
//!
//! let mut tree: Quadtree<&str> = Quadtree::new();
//! tree.insert(Point::new(0.1, 0.1), "stormy-weather").unwrap();
//! tree.insert(Point::new(0.9, 0.9), "sunny-afternoon").unwrap();
//!
//! let nearest = tree.nearest(Point::new(0.2, 0.2)).unwrap();
//! assert_eq!(nearest.payload, "stormy-weather");
//! ```

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::QuadtreeError;
use crate::geometry::{Frame, Point};
use crate::node::{self, Node, NodeData, NodeId};

/// A point-region quadtree over a fixed rectangular domain, indexing points carrying an opaque
/// payload `T`.
///
/// # Type Parameters
///
/// * `T` - The payload stored alongside each point. Must be `Clone + PartialEq` since the tree
///   delegates payloads between nodes on subdivision and queries compare them in tests.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quadtree<T> {
    arena: Vec<Node<T>>,
    root: NodeId,
    total_leaves: usize,
}

impl<T: Clone + PartialEq> Quadtree<T> {
    /// Creates a tree over the default `[0, 1) x [0, 1)` domain.
    pub fn new() -> Self {
        Self::with_domain(Frame::unit_square()).expect("unit square is always a valid domain")
    }

    /// Creates a tree over a caller-specified domain.
    ///
    /// # Errors
    ///
    /// Returns `QuadtreeError::InvalidDomain` if `frame` has non-positive width or height.
    pub fn with_domain(frame: Frame) -> Result<Self, QuadtreeError> {
        if frame.width() <= 0.0 || frame.height() <= 0.0 {
            return Err(QuadtreeError::InvalidDomain {
                width: frame.width(),
                height: frame.height(),
            });
        }
        info!("creating quadtree over domain {:?}", frame);
        Ok(Quadtree {
            arena: vec![Node::root(frame)],
            root: NodeId(0),
            total_leaves: 0,
        })
    }

    /// The number of points successfully inserted so far.
    pub fn len(&self) -> usize {
        self.total_leaves
    }

    pub fn is_empty(&self) -> bool {
        self.total_leaves == 0
    }

    /// The domain this tree indexes over.
    pub fn domain(&self) -> Frame {
        self.arena[self.root.0].frame
    }

    /// Inserts a single point with its payload.
    ///
    /// # Errors
    ///
    /// Returns `QuadtreeError::OutOfDomain` if `position` lies outside the tree's domain; the
    /// tree is left unmodified.
    pub fn insert(&mut self, position: Point, payload: T) -> Result<(), QuadtreeError> {
        debug!("inserting point {:?}", position);
        node::insert(&mut self.arena, self.root, NodeData::new(position, payload))?;
        self.total_leaves += 1;
        Ok(())
    }

    /// Inserts a batch of points in one pass, partitioning by quadrant rather than descending
    /// separately for each one. Points outside the domain are silently dropped.
    ///
    /// Returns the number of points actually inserted.
    pub fn insert_bulk(&mut self, points: &[(Point, T)]) -> usize {
        info!("bulk inserting {} points", points.len());
        let inserted = node::insert_bulk(&mut self.arena, self.root, points);
        self.total_leaves += inserted;
        inserted
    }

    /// The deepest node whose frame contains `point` (a leaf, or an interior node with no child
    /// in `point`'s quadrant).
    ///
    /// # Errors
    ///
    /// Returns `QuadtreeError::OutOfDomain` if `point` lies outside the tree's domain.
    pub fn find_containing_node(&self, point: Point) -> Result<&Node<T>, QuadtreeError> {
        if !self.domain().contains(&point) {
            return Err(QuadtreeError::OutOfDomain {
                x: point.x,
                y: point.y,
            });
        }
        let id = node::find_containing_node(&self.arena, self.root, &point);
        Ok(&self.arena[id.0])
    }

    /// Approximate nearest-point search.
    ///
    /// Exact whenever the true nearest point lies within the containing node's immediate
    /// neighborhood (orthogonal and diagonal neighbors of greater-or-equal size, plus their
    /// relevant descendants). Returns `None` for an empty tree or a point outside the domain.
    pub fn nearest(&self, point: Point) -> Option<NodeData<T>> {
        if self.total_leaves == 0 || !self.domain().contains(&point) {
            return None;
        }
        let origin = node::find_containing_node(&self.arena, self.root, &point);
        let candidates = node::find_candidates(&self.arena, self.root, origin, &point);
        debug!("nearest({:?}): {} candidates", point, candidates.len());
        closest_of(candidates.into_iter(), &point)
    }

    /// Alternative, non-authoritative nearest-point search: issues `query_disk` with a
    /// doubling-like radius schedule (`r0, r0+dr, r0+2dr, ...`) until a non-empty result is
    /// found, then returns the closest point of that result.
    ///
    /// This is **not** equivalent to [`Quadtree::nearest`]: a point just outside the current
    /// disk can be closer than every point inside it once the disk does become non-empty. Use
    /// it only where that failure mode is acceptable.
    pub fn nearest_by_expanding_disk(
        &self,
        point: Point,
        r0: f64,
        dr: f64,
    ) -> Option<NodeData<T>> {
        let domain = self.domain();
        let step = if dr > 0.0 { dr } else { 1e-9 };
        let mut radius = r0.max(0.0);
        loop {
            let hits = self.query_disk(point, radius);
            if !hits.is_empty() {
                return closest_of(hits.into_iter(), &point);
            }
            if domain_fully_covered(Frame::around_disk(point, radius), domain) {
                return None;
            }
            radius += step;
        }
    }

    /// Every stored point lying in `rect`, half-open like `Frame::contains`.
    pub fn query_range(&self, rect: Frame) -> Vec<NodeData<T>> {
        let mut found = Vec::new();
        self.query_range_into(self.root, &rect, &mut found);
        found
    }

    fn query_range_into(&self, id: NodeId, rect: &Frame, found: &mut Vec<NodeData<T>>) {
        let node = &self.arena[id.0];
        if !node.frame.intersects(rect) {
            return;
        }
        if let Some(data) = &node.data {
            if rect.contains(&data.position) {
                found.push(data.clone());
            }
        }
        for child_id in node.children.into_iter().flatten() {
            self.query_range_into(child_id, rect, found);
        }
    }

    /// Every stored point within `radius` (inclusive) of `center`. Delegates to `query_range`
    /// over the disk's bounding box and filters by Euclidean distance.
    pub fn query_disk(&self, center: Point, radius: f64) -> Vec<NodeData<T>> {
        let bbox = Frame::around_disk(center, radius);
        self.query_range(bbox)
            .into_iter()
            .filter(|nd| nd.position.distance_to(&center) <= radius)
            .collect()
    }

    /// Renders the tree as a Graphviz DOT string: one node per real tree node (dummies are never
    /// persisted, so none appear here), labeled with its frame and resident data if any. Purely a
    /// debugging aid; never called from any query path above.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        writeln!(out, "digraph Quadtree {{").unwrap();
        self.write_dot_node(self.root, &mut out);
        writeln!(out, "}}").unwrap();
        out
    }

    fn write_dot_node(&self, id: NodeId, out: &mut String) {
        let node = &self.arena[id.0];
        let label = match &node.data {
            Some(data) => format!(
                "({:.3}, {:.3})\\n[{:.3}, {:.3}]",
                data.position.x, data.position.y, node.frame.top_left.x, node.frame.top_left.y
            ),
            None => format!("[{:.3}, {:.3}]", node.frame.top_left.x, node.frame.top_left.y),
        };
        writeln!(out, "  n{} [label=\"{label}\"];", id.0).unwrap();
        for child_id in node.children.into_iter().flatten() {
            writeln!(out, "  n{} -> n{};", id.0, child_id.0).unwrap();
            self.write_dot_node(child_id, out);
        }
    }

    /// Writes [`Quadtree::to_dot`]'s output to `path`.
    pub fn write_dot<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.to_dot())
    }
}

impl<T: Clone + PartialEq> Default for Quadtree<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn closest_of<T>(candidates: impl Iterator<Item = NodeData<T>>, point: &Point) -> Option<NodeData<T>> {
    let mut best: Option<(f64, NodeData<T>)> = None;
    for candidate in candidates {
        let distance = point.distance_to(&candidate.position);
        match &best {
            // Strict `<` so the first-encountered minimal-distance candidate is never displaced,
            // realizing insertion-order tie-breaking without tracking insertion timestamps.
            Some((best_distance, _)) if distance >= *best_distance => {}
            _ => best = Some((distance, candidate)),
        }
    }
    best.map(|(_, data)| data)
}

fn domain_fully_covered(bbox: Frame, domain: Frame) -> bool {
    bbox.top_left.x <= domain.top_left.x
        && bbox.top_left.y >= domain.top_left.y
        && bbox.bottom_right.x >= domain.bottom_right.x
        && bbox.bottom_right.y <= domain.bottom_right.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_is_empty_unit_square() {
        let tree: Quadtree<()> = Quadtree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.domain(), Frame::unit_square());
    }

    #[test]
    fn test_with_domain_rejects_degenerate_domain() {
        let degenerate = Frame::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let err = Quadtree::<()>::with_domain(degenerate);
        assert!(matches!(err, Err(QuadtreeError::InvalidDomain { .. })));
    }

    #[test]
    fn test_insert_rejects_out_of_domain_point() {
        let mut tree: Quadtree<&str> = Quadtree::new();
        let err = tree.insert(Point::new(1.0, 0.5), "east-edge");
        assert!(matches!(err, Err(QuadtreeError::OutOfDomain { .. })));
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_insert_and_len() {
        let mut tree: Quadtree<&str> = Quadtree::new();
        tree.insert(Point::new(0.1, 0.1), "a").unwrap();
        tree.insert(Point::new(0.9, 0.9), "b").unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_nearest_picks_closer_of_two_corners() {
        let mut tree: Quadtree<&str> = Quadtree::new();
        tree.insert(Point::new(0.10, 0.10), "a").unwrap();
        tree.insert(Point::new(0.90, 0.90), "b").unwrap();
        assert_eq!(tree.nearest(Point::new(0.2, 0.2)).unwrap().payload, "a");
        assert_eq!(tree.nearest(Point::new(0.8, 0.8)).unwrap().payload, "b");
    }

    #[test]
    fn test_nearest_on_empty_tree_is_none() {
        let tree: Quadtree<&str> = Quadtree::new();
        assert!(tree.nearest(Point::new(0.5, 0.5)).is_none());
    }

    #[test]
    fn test_query_disk_radius_zero_returns_exact_point() {
        let mut tree: Quadtree<&str> = Quadtree::new();
        tree.insert(Point::new(0.5, 0.5), "center").unwrap();
        let hits = tree.query_disk(Point::new(0.5, 0.5), 0.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payload, "center");
    }

    #[test]
    fn test_query_disk_excludes_far_corner() {
        let mut tree: Quadtree<&str> = Quadtree::new();
        tree.insert(Point::new(0.10, 0.10), "a").unwrap();
        tree.insert(Point::new(0.90, 0.90), "b").unwrap();
        let hits = tree.query_disk(Point::new(0.5, 0.5), 0.1);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_query_range_returns_points_in_rect() {
        let mut tree: Quadtree<&str> = Quadtree::new();
        tree.insert(Point::new(0.25, 0.25), "sw").unwrap();
        tree.insert(Point::new(0.25, 0.75), "nw").unwrap();
        tree.insert(Point::new(0.75, 0.25), "se").unwrap();
        tree.insert(Point::new(0.75, 0.75), "ne").unwrap();

        let rect = Frame::new(Point::new(0.0, 1.0), Point::new(0.5, 0.5));
        let hits = tree.query_range(rect);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].payload, "nw");
    }

    #[test]
    fn test_query_range_whole_domain_returns_every_point() {
        let mut tree: Quadtree<usize> = Quadtree::new();
        for i in 0..50 {
            let x = (i as f64 * 37.0 % 97.0) / 97.0;
            let y = (i as f64 * 53.0 % 89.0) / 89.0;
            tree.insert(Point::new(x, y), i).unwrap();
        }
        let hits = tree.query_range(tree.domain());
        assert_eq!(hits.len(), 50);
    }

    #[test]
    fn test_insert_bulk_matches_sequential_insert_count() {
        let points = vec![
            (Point::new(0.1, 0.1), "a"),
            (Point::new(0.1, 0.2), "b"),
            (Point::new(0.9, 0.9), "c"),
            (Point::new(1.5, 1.5), "out-of-domain"),
        ];
        let mut bulk: Quadtree<&str> = Quadtree::new();
        let inserted = bulk.insert_bulk(&points);
        assert_eq!(inserted, 3);
        assert_eq!(bulk.len(), 3);
    }

    #[test]
    fn test_to_dot_contains_domain_root() {
        let mut tree: Quadtree<&str> = Quadtree::new();
        tree.insert(Point::new(0.1, 0.1), "a").unwrap();
        let dot = tree.to_dot();
        assert!(dot.starts_with("digraph Quadtree {"));
        assert!(dot.contains("n0"));
    }

    #[test]
    fn test_nearest_by_expanding_disk_terminates_on_sparse_tree() {
        let mut tree: Quadtree<&str> = Quadtree::new();
        tree.insert(Point::new(0.95, 0.95), "corner").unwrap();
        let found = tree.nearest_by_expanding_disk(Point::new(0.05, 0.05), 0.01, 0.01);
        assert_eq!(found.unwrap().payload, "corner");
    }

    #[test]
    fn test_nearest_by_expanding_disk_empty_tree_terminates() {
        let tree: Quadtree<&str> = Quadtree::new();
        assert!(tree
            .nearest_by_expanding_disk(Point::new(0.5, 0.5), 0.01, 0.01)
            .is_none());
    }
}
