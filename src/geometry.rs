//! ## Geometry primitives
//!
//! `Point` is a bare `(x, y)` coordinate pair with Euclidean distance. `Frame` is the axis-aligned
//! rectangle every [`Node`](crate::node::Node) owns; it uses half-open containment so that each
//! point of a subdivided frame lies in exactly one child.

use crate::direction::{Quadrant, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle, defined by its top-left (`xmin`, `ymax`) and bottom-right
/// (`xmax`, `ymin`) corners.
///
/// North is the direction of increasing `y`; east is the direction of increasing `x`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Frame {
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Frame {
            top_left,
            bottom_right,
        }
    }

    /// The frame spanning `[0, 1) x [0, 1)`, the default quadtree domain.
    pub fn unit_square() -> Self {
        Frame {
            top_left: Point::new(0.0, 1.0),
            bottom_right: Point::new(1.0, 0.0),
        }
    }

    /// The smallest frame containing the disk of the given `radius` around `center`.
    pub fn around_disk(center: Point, radius: f64) -> Self {
        Frame {
            top_left: Point::new(center.x - radius, center.y + radius),
            bottom_right: Point::new(center.x + radius, center.y - radius),
        }
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.top_left.y - self.bottom_right.y
    }

    fn xmin(&self) -> f64 {
        self.top_left.x
    }

    fn xmax(&self) -> f64 {
        self.bottom_right.x
    }

    fn ymin(&self) -> f64 {
        self.bottom_right.y
    }

    fn ymax(&self) -> f64 {
        self.top_left.y
    }

    /// The frame's four corners, indexed by the quadrant they sit in (`Nw` -> `top_left`, etc).
    pub fn corner(&self, quadrant: Quadrant) -> Point {
        match quadrant {
            Quadrant::Nw => self.top_left,
            Quadrant::Ne => Point::new(self.xmax(), self.ymax()),
            Quadrant::Se => self.bottom_right,
            Quadrant::Sw => Point::new(self.xmin(), self.ymin()),
        }
    }

    /// Half-open containment: `xmin <= x < xmax` and `ymin <= y < ymax`.
    pub fn contains(&self, point: &Point) -> bool {
        self.xmin() <= point.x
            && point.x < self.xmax()
            && self.ymin() <= point.y
            && point.y < self.ymax()
    }

    /// True if `self` and `other` share any area, inclusive of touching edges.
    pub fn intersects(&self, other: &Frame) -> bool {
        !(other.xmin() > self.xmax()
            || other.xmax() < self.xmin()
            || other.ymin() > self.ymax()
            || other.ymax() < self.ymin())
    }

    /// Which quadrant of this frame's midpoint partition `point` falls into.
    ///
    /// Callers must ensure `point` is inside the frame; the result is meaningless otherwise.
    pub fn find_location_in_frame(&self, point: &Point) -> Quadrant {
        let mid_y = (self.ymin() + self.ymax()) / 2.0;
        let mid_x = (self.xmin() + self.xmax()) / 2.0;

        let is_south = self.ymin() <= point.y && point.y < mid_y;
        let is_west = self.xmin() <= point.x && point.x < mid_x;

        match (is_south, is_west) {
            (true, true) => Quadrant::Sw,
            (true, false) => Quadrant::Se,
            (false, true) => Quadrant::Nw,
            (false, false) => Quadrant::Ne,
        }
    }

    /// Classifies an *external* point relative to this frame, returning the cardinal half-planes
    /// this frame sits in relative to it. Empty if `point` lies inside the frame.
    pub fn find_frame_relative_direction(&self, point: &Point) -> Vec<Side> {
        let mut directions = Vec::with_capacity(2);
        if self.ymin() > point.y {
            directions.push(Side::N);
        }
        if self.ymax() < point.y {
            directions.push(Side::S);
        }
        if self.xmin() > point.x {
            directions.push(Side::E);
        }
        if self.xmax() < point.x {
            directions.push(Side::W);
        }
        directions
    }

    /// The child frame occupying `quadrant` of this frame's midpoint partition.
    pub fn generate_subframe(&self, quadrant: Quadrant) -> Frame {
        let x_step = self.width() / 2.0;
        let y_step = self.height() / 2.0;
        let mut top_left = self.top_left;
        let mut bottom_right = self.bottom_right;

        match quadrant {
            Quadrant::Nw => {
                bottom_right.x -= x_step;
                bottom_right.y += y_step;
            }
            Quadrant::Ne => {
                top_left.x += x_step;
                bottom_right.y += y_step;
            }
            Quadrant::Se => {
                top_left.x += x_step;
                top_left.y -= y_step;
            }
            Quadrant::Sw => {
                top_left.y -= y_step;
                bottom_right.x -= x_step;
            }
        }

        Frame::new(top_left, bottom_right)
    }
}
