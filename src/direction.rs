//! ## Direction algebra
//!
//! This module defines the closed set of directions the quadtree's neighbor-finding algorithms
//! are built on: the four diagonal quadrants a frame subdivides into, and the four cardinal
//! sides a frame borders its neighbors across. Quadrant indices are fixed (`Nw = 0`, `Ne = 1`,
//! `Se = 2`, `Sw = 3`) because [`Node`](crate::node::Node) uses them directly as array indices.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four quadrants a [`Frame`](crate::geometry::Frame) subdivides into.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Quadrant {
    Nw = 0,
    Ne = 1,
    Se = 2,
    Sw = 3,
}

impl Quadrant {
    /// All four quadrants, in index order.
    pub const ALL: [Quadrant; 4] = [Quadrant::Nw, Quadrant::Ne, Quadrant::Se, Quadrant::Sw];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Quadrant {
        match index {
            0 => Quadrant::Nw,
            1 => Quadrant::Ne,
            2 => Quadrant::Se,
            3 => Quadrant::Sw,
            other => panic!("invalid quadrant index {other}"),
        }
    }

    /// Splits this quadrant into its two constituent cardinal sides (vertical first, horizontal
    /// second), e.g. `Nw.split() == (N, W)`.
    pub fn split(self) -> (Side, Side) {
        match self {
            Quadrant::Nw => (Side::N, Side::W),
            Quadrant::Ne => (Side::N, Side::E),
            Quadrant::Se => (Side::S, Side::E),
            Quadrant::Sw => (Side::S, Side::W),
        }
    }
}

/// One of the four cardinal sides a frame borders its neighbors across.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    N,
    S,
    W,
    E,
}

/// The axis a cardinal side's reflection acts along.
///
/// `N`/`S` reflect a quadrant top-to-bottom (their dividing line is horizontal); `W`/`E` reflect
/// a quadrant left-to-right (their dividing line is vertical).
enum Axis {
    Vertical,
    Horizontal,
}

impl Side {
    fn axis(self) -> Axis {
        match self {
            Side::N | Side::S => Axis::Vertical,
            Side::W | Side::E => Axis::Horizontal,
        }
    }

    /// The cardinal opposite of this side: `N`<->`S`, `W`<->`E`.
    pub fn opposite(self) -> Side {
        match self {
            Side::N => Side::S,
            Side::S => Side::N,
            Side::W => Side::E,
            Side::E => Side::W,
        }
    }

    /// The two quadrants of a neighbor *across* this side that abut a node on this side,
    /// indexed as `(mirror_a, mirror_b)`.
    ///
    /// For example the children on the `N` side of a parent are `Nw`/`Ne`, but a neighbor to the
    /// north touches this frame with its own `Se`/`Sw` children — those are what's returned here.
    pub fn neighboring(self) -> (Quadrant, Quadrant) {
        match self {
            Side::N => (Quadrant::Se, Quadrant::Sw),
            Side::S => (Quadrant::Ne, Quadrant::Nw),
            Side::W => (Quadrant::Ne, Quadrant::Se),
            Side::E => (Quadrant::Nw, Quadrant::Sw),
        }
    }

    /// The two quadrants of *this* frame that touch this side, e.g. `N.split_direction() ==
    /// (Nw, Ne)`.
    pub fn split_direction(self) -> (Quadrant, Quadrant) {
        match self {
            Side::N => (Quadrant::Nw, Quadrant::Ne),
            Side::S => (Quadrant::Sw, Quadrant::Se),
            Side::W => (Quadrant::Nw, Quadrant::Sw),
            Side::E => (Quadrant::Ne, Quadrant::Se),
        }
    }
}

/// What a quadrant should be reflected relative to in [`opposite_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTo {
    Side(Side),
    Center,
}

/// Reflects a quadrant relative to a side or the frame center.
///
/// - Relative to `N` or `S`: reflects top-to-bottom, keeping the east/west half fixed
///   (`Nw`<->`Sw`, `Ne`<->`Se`).
/// - Relative to `W` or `E`: reflects left-to-right, keeping the north/south half fixed
///   (`Nw`<->`Ne`, `Sw`<->`Se`).
/// - Relative to the center: reflects across both axes, the diagonal opposite
///   (`Nw`<->`Se`, `Ne`<->`Sw`).
pub fn opposite_of(quadrant: Quadrant, relative_to: RelativeTo) -> Quadrant {
    match relative_to {
        RelativeTo::Side(side) => match side.axis() {
            Axis::Vertical => Quadrant::from_index(3 - quadrant.index()),
            Axis::Horizontal => match quadrant {
                Quadrant::Nw => Quadrant::Ne,
                Quadrant::Ne => Quadrant::Nw,
                Quadrant::Se => Quadrant::Sw,
                Quadrant::Sw => Quadrant::Se,
            },
        },
        RelativeTo::Center => match quadrant {
            Quadrant::Nw => Quadrant::Se,
            Quadrant::Se => Quadrant::Nw,
            Quadrant::Ne => Quadrant::Sw,
            Quadrant::Sw => Quadrant::Ne,
        },
    }
}

/// Combines a vertical (`N`/`S`) and a horizontal (`W`/`E`) cardinal side into the quadrant they
/// jointly identify, e.g. `concatenate_directions(N, W) == Nw`.
///
/// # Panics
///
/// Panics if the two sides are not one vertical and one horizontal side (concatenating two sides
/// of the same axis, or a side with its own opposite, is a caller error — there is no quadrant
/// that is simultaneously "north" and "south").
pub fn concatenate_directions(a: Side, b: Side) -> Quadrant {
    let (vertical, horizontal) = match (a.axis(), b.axis()) {
        (Axis::Vertical, Axis::Horizontal) => (a, b),
        (Axis::Horizontal, Axis::Vertical) => (b, a),
        _ => panic!("concatenate_directions requires one vertical and one horizontal side, got {a:?} and {b:?}"),
    };
    match (vertical, horizontal) {
        (Side::N, Side::W) => Quadrant::Nw,
        (Side::N, Side::E) => Quadrant::Ne,
        (Side::S, Side::E) => Quadrant::Se,
        (Side::S, Side::W) => Quadrant::Sw,
        _ => unreachable!("axis check above guarantees vertical is N/S and horizontal is W/E"),
    }
}
