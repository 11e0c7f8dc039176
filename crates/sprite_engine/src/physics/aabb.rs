//! Axis-aligned bounding boxes and the overlap tests built on them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collision axis reported to `on_collide` callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
}

impl Axis {
    /// The axis name as a string ("X" or "Y")
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Aabb {
    /// Creates a box from its top-left corner and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The same box shifted by `(dx, dy)`
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Half-open overlap test; boxes that merely touch do not overlap
    pub fn overlaps(&self, other: &Self) -> bool {
        is_aabb_collision(
            self.x, self.y, self.width, self.height,
            other.x, other.y, other.width, other.height,
        )
    }

    /// Whether the two boxes share any span on the X axis
    pub fn overlaps_x(&self, other: &Self) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Whether the two boxes share any span on the Y axis
    pub fn overlaps_y(&self, other: &Self) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }

    /// Inclusive point test: points on any edge count as inside
    pub fn contains_inclusive(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Signed gap from `self` to `other` on each axis
    ///
    /// An axis where the boxes already overlap yields zero. Otherwise the
    /// value is positive when `other` lies to the right/below and negative
    /// when it lies to the left/above.
    pub fn gap_to(&self, other: &Self) -> (f32, f32) {
        let x = if self.overlaps_x(other) {
            0.0
        } else if self.right() <= other.x {
            other.x - self.right()
        } else {
            other.right() - self.x
        };

        let y = if self.overlaps_y(other) {
            0.0
        } else if self.bottom() <= other.y {
            other.y - self.bottom()
        } else {
            other.bottom() - self.y
        };

        (x, y)
    }
}

/// Standard half-open AABB intersection test
pub fn is_aabb_collision(
    x1: f32, y1: f32, w1: f32, h1: f32,
    x2: f32, y2: f32, w2: f32, h2: f32,
) -> bool {
    x1 < x2 + w2 && x1 + w1 > x2 && y1 < y2 + h2 && y1 + h1 > y2
}
