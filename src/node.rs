//! ## Arena-based tree nodes
//!
//! Every real node of a [`Quadtree`](crate::quadtree::Quadtree) lives in a single `Vec<Node<T>>`
//! owned by the tree and is addressed by [`NodeId`], an index newtype, rather than by pointer.
//! `parent` and `children` are therefore `Option<NodeId>` rather than owning references, which
//! keeps the tree movable by value without the aliasing hazards a raw back-pointer would bring.
//!
//! This module also defines the relative-neighbor algorithms the tree is built around: descent to
//! the node containing a point, the greater-or-equal-size neighbor lookup (with dummy-node
//! synthesis), smaller-size neighbor enumeration, diagonal-neighbor discovery, and candidate-set
//! construction for nearest-point queries.

use std::collections::{HashSet, VecDeque};

use crate::direction::{opposite_of, Quadrant, RelativeTo, Side};
use crate::errors::QuadtreeError;
use crate::geometry::{Frame, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An index into a [`Quadtree`](crate::quadtree::Quadtree)'s node arena.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A stored point and its opaque payload, carried through the tree as a unit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData<T> {
    pub position: Point,
    pub payload: T,
}

impl<T> NodeData<T> {
    pub fn new(position: Point, payload: T) -> Self {
        NodeData { position, payload }
    }
}

/// A node of the tree: a frame, at most one resident data point, up to four children, and a
/// back-reference to its parent.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub frame: Frame,
    pub data: Option<NodeData<T>>,
    pub(crate) children: [Option<NodeId>; 4],
    pub(crate) parent: Option<NodeId>,
    pub depth: usize,
    pub is_divided: bool,
}

impl<T> Node<T> {
    pub(crate) fn root(frame: Frame) -> Self {
        Node {
            frame,
            data: None,
            children: [None; 4],
            parent: None,
            depth: 0,
            is_divided: false,
        }
    }

    /// A leaf has no children; it may still hold a resident data point.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children[quadrant.index()]
    }
}

/// A transient, per-query stand-in for a coarser neighbor's data as if it occupied a finer
/// quadrant slot. Never attached to any node's `children` array.
#[derive(Debug, Clone)]
pub struct DummyNode<T> {
    pub frame: Frame,
    pub data: Option<NodeData<T>>,
}

/// Either a real arena node or a dummy synthesized during neighbor lookup.
#[derive(Debug, Clone)]
pub enum Neighbor<T> {
    Real(NodeId),
    Dummy(DummyNode<T>),
}

fn neighbor_frame<T>(arena: &[Node<T>], neighbor: &Neighbor<T>) -> Frame {
    match neighbor {
        Neighbor::Real(id) => arena[id.0].frame,
        Neighbor::Dummy(dummy) => dummy.frame,
    }
}

fn neighbor_data<'a, T>(arena: &'a [Node<T>], neighbor: &'a Neighbor<T>) -> Option<&'a NodeData<T>> {
    match neighbor {
        Neighbor::Real(id) => arena[id.0].data.as_ref(),
        Neighbor::Dummy(dummy) => dummy.data.as_ref(),
    }
}

fn neighbor_is_leaf<T>(arena: &[Node<T>], neighbor: &Neighbor<T>) -> bool {
    match neighbor {
        Neighbor::Real(id) => arena[id.0].is_leaf(),
        // Dummies are never subdivided; they stand in for exactly one quadrant slot.
        Neighbor::Dummy(_) => true,
    }
}

fn neighbor_child<T>(arena: &[Node<T>], neighbor: &Neighbor<T>, quadrant: Quadrant) -> Option<Neighbor<T>> {
    match neighbor {
        Neighbor::Real(id) => arena[id.0].children[quadrant.index()].map(Neighbor::Real),
        Neighbor::Dummy(_) => None,
    }
}

/// Finds or creates the arena slot at `quadrant` of `parent_id`, marking `parent_id` divided.
fn ensure_child<T>(arena: &mut Vec<Node<T>>, parent_id: NodeId, quadrant: Quadrant) -> NodeId {
    if let Some(child_id) = arena[parent_id.0].children[quadrant.index()] {
        return child_id;
    }
    let subframe = arena[parent_id.0].frame.generate_subframe(quadrant);
    let depth = arena[parent_id.0].depth + 1;
    let child = Node {
        frame: subframe,
        data: None,
        children: [None; 4],
        parent: Some(parent_id),
        depth,
        is_divided: false,
    };
    let child_id = NodeId(arena.len());
    arena.push(child);
    arena[parent_id.0].children[quadrant.index()] = Some(child_id);
    arena[parent_id.0].is_divided = true;
    child_id
}

/// Inserts `nd` starting from `id`, descending and subdividing as needed.
///
/// Written as a loop rather than recursion: a run of nearly coincident points can force a split
/// at every level down to the precision of `f64`, and this keeps that descent in constant stack
/// space.
pub fn insert<T: Clone + PartialEq>(
    arena: &mut Vec<Node<T>>,
    id: NodeId,
    nd: NodeData<T>,
) -> Result<(), QuadtreeError> {
    let mut current = id;
    loop {
        let frame = arena[current.0].frame;
        if !frame.contains(&nd.position) {
            return Err(QuadtreeError::OutOfDomain {
                x: nd.position.x,
                y: nd.position.y,
            });
        }

        let nd_dir = frame.find_location_in_frame(&nd.position);
        let is_divided = arena[current.0].is_divided;
        let has_data = arena[current.0].data.is_some();

        if !is_divided && !has_data {
            arena[current.0].data = Some(nd);
            return Ok(());
        }

        if has_data {
            let candidate = arena[current.0].children[nd_dir.index()];
            if let Some(child_id) = candidate {
                current = child_id;
                continue;
            }

            let resident_position = arena[current.0].data.as_ref().unwrap().position;
            let resident_dir = frame.find_location_in_frame(&resident_position);
            let child_id = ensure_child(arena, current, nd_dir);

            if nd_dir == resident_dir {
                let resident = arena[current.0].data.take().unwrap();
                arena[child_id.0].data = Some(resident);
                current = child_id;
                continue;
            }
            arena[child_id.0].data = Some(nd);
            return Ok(());
        }

        // Divided, no resident data: descend if a child already claims this quadrant, else this
        // interior slot becomes the new home for `nd`.
        match arena[current.0].children[nd_dir.index()] {
            Some(child_id) => {
                current = child_id;
            }
            None => {
                arena[current.0].data = Some(nd);
                return Ok(());
            }
        }
    }
}

/// Inserts a batch of points in one pass, partitioning by quadrant instead of descending
/// separately for each point. Points outside `frame` are silently dropped. Returns the number of
/// points actually inserted.
pub fn insert_bulk<T: Clone + PartialEq>(
    arena: &mut Vec<Node<T>>,
    id: NodeId,
    points: &[(Point, T)],
) -> usize {
    let frame = arena[id.0].frame;
    let filtered: Vec<(Point, T)> = points
        .iter()
        .cloned()
        .filter(|(p, _)| frame.contains(p))
        .collect();
    if filtered.is_empty() {
        return 0;
    }

    let is_divided = arena[id.0].is_divided;
    let has_data = arena[id.0].data.is_some();

    if !is_divided && !has_data && filtered.len() == 1 {
        let (position, payload) = filtered.into_iter().next().unwrap();
        arena[id.0].data = Some(NodeData::new(position, payload));
        return 1;
    }

    let mut buckets: [Vec<(Point, T)>; 4] = Default::default();
    for (position, payload) in filtered {
        let quadrant = frame.find_location_in_frame(&position);
        buckets[quadrant.index()].push((position, payload));
    }
    if let Some(resident) = arena[id.0].data.take() {
        let quadrant = frame.find_location_in_frame(&resident.position);
        buckets[quadrant.index()].insert(0, (resident.position, resident.payload));
    }

    let mut inserted = 0;
    for quadrant in Quadrant::ALL {
        let bucket = std::mem::take(&mut buckets[quadrant.index()]);
        if bucket.is_empty() {
            continue;
        }
        let child_id = ensure_child(arena, id, quadrant);
        inserted += insert_bulk(arena, child_id, &bucket);
    }
    inserted
}

/// Descends from `id` to the deepest node whose frame contains `point` (a leaf, or an interior
/// node with no child in `point`'s quadrant).
pub fn find_containing_node<T>(arena: &[Node<T>], id: NodeId, point: &Point) -> NodeId {
    let mut current = id;
    loop {
        let quadrant = arena[current.0].frame.find_location_in_frame(point);
        match arena[current.0].children[quadrant.index()] {
            Some(child_id) => current = child_id,
            None => return current,
        }
    }
}

/// Finds a node of depth less than or equal to `id`'s whose frame abuts `id`'s across `side`,
/// synthesizing a dummy child when the real neighbor carries data at a quadrant that was never
/// formally subdivided.
pub fn get_neighbor_of_greater_or_equal_size<T: Clone>(
    arena: &[Node<T>],
    id: NodeId,
    side: Side,
) -> Option<Neighbor<T>> {
    let parent_id = arena[id.0].parent?;
    let (mirror_a, mirror_b) = side.neighboring();

    if arena[parent_id.0].children[mirror_a.index()] == Some(id) {
        let reflected = opposite_of(mirror_a, RelativeTo::Side(side));
        return Some(match arena[parent_id.0].children[reflected.index()] {
            Some(sibling_id) => Neighbor::Real(sibling_id),
            None => Neighbor::Real(parent_id),
        });
    }
    if arena[parent_id.0].children[mirror_b.index()] == Some(id) {
        let reflected = opposite_of(mirror_b, RelativeTo::Side(side));
        return Some(match arena[parent_id.0].children[reflected.index()] {
            Some(sibling_id) => Neighbor::Real(sibling_id),
            None => Neighbor::Real(parent_id),
        });
    }

    let parent_neighbor = get_neighbor_of_greater_or_equal_size(arena, parent_id, side)?;
    let node_id = match parent_neighbor {
        Neighbor::Dummy(dummy) => return Some(Neighbor::Dummy(dummy)),
        Neighbor::Real(node_id) => node_id,
    };
    if arena[node_id.0].is_leaf() {
        return Some(Neighbor::Real(node_id));
    }

    let self_is_mirror_b_sibling =
        arena[parent_id.0].children[opposite_of(mirror_b, RelativeTo::Side(side)).index()] == Some(id);
    let target = if self_is_mirror_b_sibling { mirror_b } else { mirror_a };

    match arena[node_id.0].children[target.index()] {
        Some(child_id) => Some(Neighbor::Real(child_id)),
        None => arena[node_id.0].data.clone().map(|data| {
            Neighbor::Dummy(DummyNode {
                frame: arena[node_id.0].frame.generate_subframe(target),
                data: Some(data),
            })
        }),
    }
}

/// Descends into `neighbor` (and its descendants), collecting every leaf or data-bearing node
/// whose frame abuts `side`. Short-circuits through empty halves via the counter-direction check.
pub fn find_neighbors_of_smaller_size<T: Clone>(
    arena: &[Node<T>],
    neighbor: Option<Neighbor<T>>,
    side: Side,
) -> Vec<Neighbor<T>> {
    let mut queue: VecDeque<Neighbor<T>> = VecDeque::new();
    queue.extend(neighbor);

    let (same_a, same_b) = side.neighboring();
    let counter = side.opposite();
    let (counter_a, counter_b) = counter.neighboring();

    let mut found = Vec::new();
    while let Some(node) = queue.pop_front() {
        if let Some(data) = neighbor_data(arena, &node) {
            let data_dir = neighbor_frame(arena, &node).find_location_in_frame(&data.position);
            if data_dir == same_a || data_dir == same_b {
                found.push(node.clone());
            }
        }

        if !neighbor_is_leaf(arena, &node) {
            let has_counter_children = neighbor_child(arena, &node, counter_a).is_some()
                || neighbor_child(arena, &node, counter_b).is_some();
            let (first, second) = if !has_counter_children {
                (counter_a, counter_b)
            } else {
                (same_a, same_b)
            };
            queue.extend(neighbor_child(arena, &node, first));
            queue.extend(neighbor_child(arena, &node, second));
        }
    }
    found
}

/// Finds the (up to four) nodes diagonally touching `id`'s corners by nudging each corner point
/// an epsilon outward and descending from the root, rather than threading the full ancestor
/// chain: the probe point's containing node necessarily sits across that corner from `id`.
pub fn find_diagonal_neighbors<T>(arena: &[Node<T>], root: NodeId, id: NodeId) -> Vec<NodeId> {
    const EPSILON: f64 = 1e-9;
    let frame = arena[id.0].frame;
    let root_frame = arena[root.0].frame;

    let mut found = Vec::new();
    for diagonal in Quadrant::ALL {
        let (vertical, horizontal) = diagonal.split();
        let corner = frame.corner(diagonal);
        let dx = if horizontal == Side::E { EPSILON } else { -EPSILON };
        let dy = if vertical == Side::N { EPSILON } else { -EPSILON };
        let probe = Point::new(corner.x + dx, corner.y + dy);

        if !root_frame.contains(&probe) {
            continue;
        }
        let candidate = find_containing_node(arena, root, &probe);
        if candidate != id {
            found.push(candidate);
        }
    }
    found
}

/// Builds the candidate set for a nearest-point query rooted at `origin`, the node containing
/// `point`: origin's own data, relevant descendants of origin's existing children, orthogonal
/// neighbors (and their smaller-size descendants), and diagonal neighbors.
pub fn find_candidates<T: Clone + PartialEq>(
    arena: &[Node<T>],
    root: NodeId,
    origin: NodeId,
    point: &Point,
) -> Vec<NodeData<T>> {
    let mut candidates = Vec::new();
    let mut covered_sides: HashSet<Side> = HashSet::new();

    if let Some(data) = &arena[origin.0].data {
        candidates.push(data.clone());
    }

    // Any existing child of `origin` sits outside the quadrant containing `point` (otherwise
    // descent would have continued into it), so it borders `point` on one or two cardinal sides.
    for child_id in arena[origin.0].children.into_iter().flatten() {
        let sides = arena[child_id.0].frame.find_frame_relative_direction(point);
        for side in sides {
            covered_sides.insert(side);
            for found in find_neighbors_of_smaller_size(arena, Some(Neighbor::Real(child_id)), side) {
                if let Some(data) = neighbor_data(arena, &found) {
                    candidates.push(data.clone());
                }
            }
        }
    }

    for side in [Side::N, Side::S, Side::W, Side::E] {
        if covered_sides.contains(&side) {
            continue;
        }
        if let Some(neighbor) = get_neighbor_of_greater_or_equal_size(arena, origin, side) {
            for found in find_neighbors_of_smaller_size(arena, Some(neighbor), side) {
                if let Some(data) = neighbor_data(arena, &found) {
                    candidates.push(data.clone());
                }
            }
        }
    }

    for diagonal_id in find_diagonal_neighbors(arena, root, origin) {
        if let Some(data) = &arena[diagonal_id.0].data {
            candidates.push(data.clone());
        }
    }

    candidates
}
