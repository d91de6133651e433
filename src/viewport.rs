//! Zoom and pan state for the canvas surface.
//!
//! The graph itself is stored in world coordinates; pointer events arrive
//! in screen coordinates and must be converted through [`Viewport`] before
//! reaching the geometry or graph layers.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Lower zoom bound.
pub const MIN_ZOOM: f32 = 0.5;
/// Upper zoom bound.
pub const MAX_ZOOM: f32 = 2.0;
/// Zoom increment per step.
pub const ZOOM_STEP: f32 = 0.1;

/// Canvas-global zoom factor and pan offset.
///
/// `world_to_screen(p) = p * zoom + offset` and
/// `screen_to_world(p) = (p - offset) / zoom`; the two are exact inverses
/// up to floating-point rounding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f32,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Point::ZERO,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase zoom by one step, clamped to [`MAX_ZOOM`].
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Decrease zoom by one step, clamped to [`MIN_ZOOM`].
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Restore the default view: zoom 1, no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Convert a pointer position from screen space to world space.
    pub fn screen_to_world(&self, p: Point) -> Point {
        (p - self.offset) / self.zoom
    }

    /// Convert a world-space position back to screen space.
    pub fn world_to_screen(&self, p: Point) -> Point {
        p * self.zoom + self.offset
    }

    /// Shift the pan offset by a screen-space delta. Panning never
    /// touches the zoom factor.
    pub fn pan_by(&mut self, delta: Point) {
        self.offset = self.offset + delta;
    }
}
