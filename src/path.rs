//! Cubic Bezier construction and evaluation for connection curves.
//!
//! Connections are rendered as cubic Beziers. The control-point rule is
//! asymmetric: a connection ending at a bottom-facing socket drops below
//! the source before turning up into the socket, because a purely
//! horizontal S-curve would visually cross the node body. All other
//! connections use the standard horizontal S-curve.

use crate::geometry::{Point, PortSide};

/// Control-point offset used by the bottom-socket curve rule.
const BOTTOM_DROP: f32 = 50.0;

/// Number of parameter samples used when approximating a curve as a
/// polyline, e.g. for marquee intersection. 21 points, inclusive of both
/// endpoints.
pub const CURVE_SAMPLES: usize = 21;

/// A cubic Bezier curve in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicBezier {
    /// Build the connection curve from a source socket to a target socket.
    ///
    /// If the target port faces `Bottom`, the control points are
    /// `(source.x + 50, source.y)` and `(target.x, max(source.y, target.y + 50))`,
    /// producing a curve that drops down before turning into the socket.
    /// Otherwise the curve is a horizontal S-curve with both control
    /// points at the midpoint x.
    pub fn connection(source: Point, target: Point, target_side: PortSide) -> Self {
        match target_side {
            PortSide::Bottom => Self {
                p0: source,
                p1: Point::new(source.x + BOTTOM_DROP, source.y),
                p2: Point::new(target.x, source.y.max(target.y + BOTTOM_DROP)),
                p3: target,
            },
            PortSide::Left | PortSide::Right => {
                let mid_x = (source.x + target.x) / 2.0;
                Self {
                    p0: source,
                    p1: Point::new(mid_x, source.y),
                    p2: Point::new(mid_x, target.y),
                    p3: target,
                }
            }
        }
    }

    /// Evaluate the curve at parameter `t` using the cubic Bernstein form.
    pub fn eval(&self, t: f32) -> Point {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        let a = mt2 * mt;
        let b = 3.0 * mt2 * t;
        let c = 3.0 * mt * t2;
        let d = t2 * t;

        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// Iterator over [`CURVE_SAMPLES`] evenly spaced points on the curve,
    /// including both endpoints.
    pub fn sample_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..CURVE_SAMPLES).map(move |i| self.eval(i as f32 / (CURVE_SAMPLES - 1) as f32))
    }

    /// SVG path commands for the curve (`M ... C ...`), usable by any
    /// renderer that draws path strings.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {} {} {} {} {}",
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.p2.x, self.p2.y, self.p3.x, self.p3.y
        )
    }
}
