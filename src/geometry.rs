//! World-space geometry for the workflow canvas.
//!
//! Nodes have a fixed 180×80 footprint; every port and hit-test computation
//! derives from the node's top-left corner. All functions here are pure and
//! operate in world coordinates (see [`crate::viewport`] for screen↔world
//! conversion).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Fixed node width used by every geometry computation.
pub const NODE_WIDTH: f32 = 180.0;
/// Fixed node height used by every geometry computation.
pub const NODE_HEIGHT: f32 = 80.0;

/// How far a side socket sits outside the node body.
const PORT_STEM: f32 = 6.0;
/// Vertical offset of the first left/right port row.
const SIDE_PORT_TOP: f32 = 32.0;
/// Vertical spacing between left/right port rows.
const SIDE_PORT_SPACING: f32 = 28.0;
/// Horizontal offset of the first bottom socket.
const BOTTOM_PORT_LEFT: f32 = 90.0;
/// Horizontal spacing between bottom sockets.
const BOTTOM_PORT_SPACING: f32 = 40.0;

/// A 2-D point or vector in either world or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Point;
    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// Axis-aligned rectangle stored as min/max corners.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Build a rectangle from two arbitrary corners, normalizing so that
    /// `min <= max` on both axes. A marquee dragged up-left produces the
    /// same rectangle as one dragged down-right.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Inclusive containment test. Degenerate (zero-area) rectangles
    /// contain exactly the points on their boundary.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grow the rectangle by `padding` on every side.
    pub fn expanded(&self, padding: f32) -> Self {
        Self {
            min: Point::new(self.min.x - padding, self.min.y - padding),
            max: Point::new(self.max.x + padding, self.max.y + padding),
        }
    }

    /// Inclusive AABB-vs-AABB intersection. Boundary-touching rectangles
    /// count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Which edge of the node a port is attached to.
///
/// Inputs may mix `Left` and `Bottom` (bottom sockets are auxiliary
/// "context" inputs, e.g. a branch's extra input); outputs are always
/// `Right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSide {
    Left,
    Right,
    Bottom,
}

/// The world-space footprint of a node at `position`.
pub fn node_rect(position: Point) -> Rect {
    Rect {
        min: position,
        max: Point::new(position.x + NODE_WIDTH, position.y + NODE_HEIGHT),
    }
}

/// Socket center offset from the node's top-left corner.
///
/// `index` counts within the subset of ports on the *same side* of the
/// node; bottom sockets do not shift the left/right rows and vice versa.
pub fn port_offset(side: PortSide, index: usize) -> Point {
    match side {
        PortSide::Left => Point::new(-PORT_STEM, SIDE_PORT_TOP + index as f32 * SIDE_PORT_SPACING),
        PortSide::Right => Point::new(
            NODE_WIDTH + PORT_STEM,
            SIDE_PORT_TOP + index as f32 * SIDE_PORT_SPACING,
        ),
        PortSide::Bottom => Point::new(
            BOTTOM_PORT_LEFT + index as f32 * BOTTOM_PORT_SPACING,
            NODE_HEIGHT + PORT_STEM,
        ),
    }
}

/// World-space socket center for a port on a node at `node_position`.
pub fn port_world_position(node_position: Point, side: PortSide, index: usize) -> Point {
    node_position + port_offset(side, index)
}
