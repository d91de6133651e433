//! Background grid line generation.
//!
//! Produces screen-space line segments for the canvas background so the
//! renderer can draw them directly. Lines track the viewport: panning
//! shifts the grid phase and zooming scales the spacing.

use crate::geometry::Point;
use crate::viewport::Viewport;

/// World-space distance between grid lines.
pub const GRID_SPACING: f32 = 20.0;

/// Below this on-screen spacing the grid is dropped entirely rather than
/// rendered as near-solid noise.
pub const MIN_VISIBLE_SPACING: f32 = 4.0;

/// One screen-space grid segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    pub start: Point,
    pub end: Point,
}

/// Grid segments covering a `width` × `height` screen area under the
/// given viewport. Returns an empty set when zoomed out far enough that
/// the effective spacing drops below [`MIN_VISIBLE_SPACING`].
pub fn grid_lines(viewport: &Viewport, width: f32, height: f32) -> Vec<GridLine> {
    let spacing = GRID_SPACING * viewport.zoom;
    if spacing < MIN_VISIBLE_SPACING {
        return Vec::new();
    }

    let mut lines = Vec::new();

    // Phase-shift by the pan offset so the grid appears anchored to the
    // world, not the screen
    let mut x = viewport.offset.x.rem_euclid(spacing);
    while x <= width {
        lines.push(GridLine {
            start: Point::new(x, 0.0),
            end: Point::new(x, height),
        });
        x += spacing;
    }

    let mut y = viewport.offset.y.rem_euclid(spacing);
    while y <= height {
        lines.push(GridLine {
            start: Point::new(0.0, y),
            end: Point::new(width, y),
        });
        y += spacing;
    }

    lines
}
