//! ## Custom Errors for Pointregion
//!
//! This module defines the errors surfaced by fallible entry points of the quadtree. Misuse of
//! the internal direction algebra (concatenating opposite cardinals) is treated as a programming
//! defect and panics instead of going through this type.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur while building or querying a [`crate::quadtree::Quadtree`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadtreeError {
    /// Occurs when a point lies outside the tree's domain.
    OutOfDomain {
        /// The x coordinate that was rejected.
        x: f64,
        /// The y coordinate that was rejected.
        y: f64,
    },
    /// Occurs when a degenerate domain (non-positive width or height) is requested.
    InvalidDomain {
        /// The width that was provided.
        width: f64,
        /// The height that was provided.
        height: f64,
    },
}

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::OutOfDomain { x, y } => {
                write!(f, "point ({x}, {y}) lies outside the quadtree's domain")
            }
            QuadtreeError::InvalidDomain { width, height } => {
                write!(
                    f,
                    "invalid domain: width {width} and height {height} must both be positive"
                )
            }
        }
    }
}

impl Error for QuadtreeError {}
