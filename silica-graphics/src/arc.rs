//! Arc construction: tangent arcs and circular arcs as cubic Béziers.

use crate::geometry::Point;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Geometry produced by [`tangent_arc`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TangentArc {
    /// The tangents are degenerate; nothing is appended.
    None,
    /// The points are collinear; a straight line to the first tangent end.
    Line(Point),
    /// A center-radius arc.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        negative: bool,
    },
}

/// Arc of `radius` tangent to the line `current → tangent1` and to the line
/// `tangent1 → tangent2`.
///
/// `san` is the cross product of the two direction deltas measured from
/// `tangent1`. Its sign chooses which side the unit normals point to and the
/// sweep direction; zero means the three points are collinear (this includes
/// `tangent1 == current`). A zero-length second tangent yields nothing.
pub fn tangent_arc(current: Point, tangent1: Point, tangent2: Point, radius: f64) -> TangentArc {
    let dx0 = current.x - tangent1.x;
    let dy0 = current.y - tangent1.y;
    let dx2 = tangent2.x - tangent1.x;
    let dy2 = tangent2.y - tangent1.y;

    let xl2 = (dx2 * dx2 + dy2 * dy2).sqrt();
    if xl2 == 0.0 {
        return TangentArc::None;
    }

    let san = dx2 * dy0 - dx0 * dy2;
    if san == 0.0 {
        return TangentArc::Line(tangent1);
    }

    let xl0 = (dx0 * dx0 + dy0 * dy0).sqrt();
    if xl0 == 0.0 {
        return TangentArc::None;
    }

    let (n0x, n0y, n2x, n2y) = if san < 0.0 {
        (-dy0 / xl0, dx0 / xl0, dy2 / xl2, -dx2 / xl2)
    } else {
        (dy0 / xl0, -dx0 / xl0, -dy2 / xl2, dx2 / xl2)
    };

    // Solve tangent1 + r·(t·d0 + n0) == tangent1 + r·(s·d2 + n2) for t.
    let t = (dx2 * n2y - dx2 * n0y - dy2 * n2x + dy2 * n0x) / san;

    TangentArc::Arc {
        center: Point::new(
            tangent1.x + radius * (t * dx0 + n0x),
            tangent1.y + radius * (t * dy0 + n0y),
        ),
        radius,
        start_angle: (-n0y).atan2(-n0x),
        end_angle: (-n2y).atan2(-n2x),
        negative: san < 0.0,
    }
}

/// A circular arc flattened to cubic segments.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierArc {
    pub start: Point,
    /// `[control1, control2, end]` per segment.
    pub curves: Vec<[Point; 3]>,
}

/// Cubic approximation of the arc around `center` from `start` to `end`.
///
/// Each segment spans at most a quarter turn. The end angle is wrapped so the
/// sweep runs forward (or backward when `negative`) by less than a full turn
/// past the start.
pub fn bezier_arc(center: Point, radius: f64, start: f64, end: f64, negative: bool) -> BezierArc {
    let mut end = end;
    if negative {
        while end > start {
            end -= TAU;
        }
        while start - end > TAU {
            end += TAU;
        }
    } else {
        while end < start {
            end += TAU;
        }
        while end - start > TAU {
            end -= TAU;
        }
    }

    let sweep = end - start;
    let num_segments = ((sweep.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let step = sweep / num_segments as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let on_circle = |px: f64, py: f64| Point::new(center.x + radius * px, center.y + radius * py);

    let curves = (0..num_segments)
        .map(|i| {
            let angle1 = start + i as f64 * step;
            let angle2 = angle1 + step;
            let (y1, x1) = angle1.sin_cos();
            let (y2, x2) = angle2.sin_cos();
            [
                on_circle(x1 - k * y1, y1 + k * x1),
                on_circle(x2 + k * y2, y2 - k * x2),
                on_circle(x2, y2),
            ]
        })
        .collect();

    BezierArc {
        start: on_circle(start.cos(), start.sin()),
        curves,
    }
}
