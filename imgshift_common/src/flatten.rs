// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening path commands into polygons.
//!
//! Bézier curves are subdivided adaptively until they are flat enough, elliptical arcs are
//! sampled at a fixed number of steps. Every subpath carries the winding direction of its
//! polygon, computed once with the shoelace formula.

use crate::kurbo::{Affine, Point, Rect, Vec2};
use crate::path::{CommandKind, PathCommand};
use core::f64::consts::{PI, TAU};
use log::warn;

/// Maximum squared distance between the midpoint of a curve and the midpoint of its chord for
/// the curve to count as flat.
pub const FLATNESS_TOLERANCE_SQ: f64 = 0.1;
/// Squared chord length below which a curve's endpoints are treated as coincident.
pub const COINCIDENT_EPSILON_SQ: f64 = 1e-6;
/// For curves with coincident endpoints, the maximum squared distance of the control points
/// from the start point for the curve to count as flat.
pub const CONTROL_TOLERANCE_SQ: f64 = 0.5;
/// Hard limit on the subdivision depth of a single curve, whatever the flatness test says.
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;
/// Number of line segments an elliptical arc is sampled into.
pub const ARC_STEPS: usize = 20;

/// A flattened, possibly closed, polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    /// The points of the polygon in order.
    pub points: Vec<Point>,
    /// `+1` for clockwise, `-1` for counter-clockwise (in a y-down coordinate system).
    pub winding: i32,
}

impl Subpath {
    /// Create a subpath, computing its winding direction.
    pub fn new(points: Vec<Point>) -> Self {
        let winding = winding_direction(&points);
        Self { points, winding }
    }

    /// Map all points through `affine`, recomputing the winding direction.
    ///
    /// Mirroring transforms flip the orientation of a polygon, so the direction has to be
    /// computed in the target space.
    pub fn transform(&self, affine: Affine) -> Self {
        Self::new(self.points.iter().map(|p| affine * *p).collect())
    }

    /// Whether the last point coincides with the first one.
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }

    /// The bounding box of all points, if there are any.
    pub fn bounds(&self) -> Option<Rect> {
        bounds(self.points.iter().copied())
    }

    /// Whether any coordinate is NaN or infinite.
    pub fn has_non_finite(&self) -> bool {
        self.points.iter().any(|p| !p.is_finite())
    }
}

/// The bounding box of a set of points.
pub fn bounds(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let init = Rect::from_points(first, first);
    Some(points.fold(init, |r, p| r.union_pt(p)))
}

/// Compute the winding direction of a polygon with the shoelace formula.
///
/// In a y-down coordinate system, a negative signed area means the polygon runs clockwise
/// (`+1`), a positive one means counter-clockwise (`-1`). Degenerate polygons are `+1`.
pub fn winding_direction(polygon: &[Point]) -> i32 {
    if polygon.len() < 3 {
        return 1;
    }
    let mut signed_area = 0.0;
    for (i, p1) in polygon.iter().enumerate() {
        let p2 = polygon[(i + 1) % polygon.len()];
        signed_area += (p2.x - p1.x) * (p2.y + p1.y);
    }
    if signed_area > 0.0 {
        -1
    } else {
        1
    }
}

/// Flatten a cubic Bézier curve.
///
/// The first point of the output is `p0` and the last is `p3`, both exactly.
pub fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Vec<Point> {
    let mut out = vec![p0];
    // Segments still to visit; the top of the stack is always the leftmost one, so leaves are
    // reached in curve order.
    let mut stack = vec![([p0, p1, p2, p3], 0_u32)];
    while let Some((seg, depth)) = stack.pop() {
        if depth >= MAX_SUBDIVISION_DEPTH || is_flat(&seg) {
            out.push(seg[3]);
            continue;
        }
        let (left, right) = subdivide(&seg);
        stack.push((right, depth + 1));
        stack.push((left, depth + 1));
    }
    out
}

/// Flatten a quadratic Bézier curve by elevating it to a cubic.
pub fn flatten_quad(p0: Point, p1: Point, p2: Point) -> Vec<Point> {
    let c1 = p0 + (p1 - p0) * (2.0 / 3.0);
    let c2 = p2 + (p1 - p2) * (2.0 / 3.0);
    flatten_cubic(p0, c1, c2, p2)
}

fn subdivide(seg: &[Point; 4]) -> ([Point; 4], [Point; 4]) {
    let [p0, p1, p2, p3] = *seg;
    let p01 = p0.midpoint(p1);
    let p12 = p1.midpoint(p2);
    let p23 = p2.midpoint(p3);
    let p012 = p01.midpoint(p12);
    let p123 = p12.midpoint(p23);
    let mid = p012.midpoint(p123);
    ([p0, p01, p012, mid], [mid, p123, p23, p3])
}

fn is_flat(seg: &[Point; 4]) -> bool {
    let [p0, p1, p2, p3] = *seg;
    if (p3 - p0).hypot2() < COINCIDENT_EPSILON_SQ {
        return (p1 - p0).hypot2() < CONTROL_TOLERANCE_SQ
            && (p2 - p0).hypot2() < CONTROL_TOLERANCE_SQ;
    }
    let curve_mid = subdivide(seg).0[3];
    (curve_mid - p0.midpoint(p3)).hypot2() < FLATNESS_TOLERANCE_SQ
}

/// An elliptical arc in endpoint parameterization, as written in path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointArc {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Radii before any correction.
    pub radii: Vec2,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_rotation: f64,
    /// Whether the arc spans more than 180 degrees.
    pub large_arc: bool,
    /// Whether the arc is drawn in the positive-angle direction.
    pub sweep: bool,
}

/// Sample an elliptical arc at [`ARC_STEPS`] segments.
///
/// The output starts at `arc.from` and ends exactly at `arc.to`. A zero radius degrades to a
/// straight line and coincident endpoints to the single end point.
pub fn flatten_arc(arc: &EndpointArc) -> Vec<Point> {
    let EndpointArc { from, to, .. } = *arc;
    if from == to {
        return vec![to];
    }
    let mut rx = arc.radii.x.abs();
    let mut ry = arc.radii.y.abs();
    if rx == 0.0 || ry == 0.0 {
        return vec![from, to];
    }

    let (sin_phi, cos_phi) = arc.x_rotation.to_radians().sin_cos();

    // Midpoint between the endpoints, in the ellipse's rotated frame.
    let half = (from - to) * 0.5;
    let x1p = cos_phi * half.x + sin_phi * half.y;
    let y1p = -sin_phi * half.x + cos_phi * half.y;

    // Scale the radii up when they cannot span the chord.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let (rx2, ry2) = (rx * rx, ry * ry);
    let denom = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let sq = if denom == 0.0 {
        0.0
    } else {
        ((rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p) / denom).max(0.0)
    };
    let mut coef = sq.sqrt();
    if arc.large_arc == arc.sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let mid = from.midpoint(to);
    let center = Point::new(
        cos_phi * cxp - sin_phi * cyp + mid.x,
        sin_phi * cxp + cos_phi * cyp + mid.y,
    );

    let u = Vec2::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Vec2::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let theta1 = vector_angle(Vec2::new(1.0, 0.0), u);
    let mut dtheta = vector_angle(u, v);
    if !arc.sweep && dtheta > 0.0 {
        dtheta -= TAU;
    } else if arc.sweep && dtheta < 0.0 {
        dtheta += TAU;
    }

    let mut points: Vec<Point> = (0..=ARC_STEPS)
        .map(|i| {
            let t = theta1 + (i as f64 / ARC_STEPS as f64) * dtheta;
            let (sin_t, cos_t) = t.sin_cos();
            let px = rx * cos_t;
            let py = ry * sin_t;
            Point::new(
                cos_phi * px - sin_phi * py + center.x,
                sin_phi * px + cos_phi * py + center.y,
            )
        })
        .collect();
    points[0] = from;
    points[ARC_STEPS] = to;
    points
}

/// The signed angle from `u` to `v`.
fn vector_angle(u: Vec2, v: Vec2) -> f64 {
    let n = u.hypot() * v.hypot();
    if n == 0.0 {
        return 0.0;
    }
    let c = (u.dot(v) / n).clamp(-1.0, 1.0);
    let sign = if u.cross(v) >= 0.0 { 1.0 } else { -1.0 };
    sign * c.acos().min(PI)
}

#[derive(Clone, Copy, PartialEq)]
enum LastControl {
    None,
    Cubic(Point),
    Quad(Point),
}

/// Flatten a list of path commands into subpaths.
///
/// A moveto starts a new subpath; a closepath appends the start point of the current subpath
/// to it and moves the current point back there. Subpaths with fewer than two points carry no
/// geometry and are dropped.
pub fn flatten_commands(commands: &[PathCommand]) -> Vec<Subpath> {
    let mut subpaths = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    let mut pos = Point::ZERO;
    let mut start = Point::ZERO;
    let mut last_control = LastControl::None;

    for cmd in commands {
        let a = cmd.args.as_slice();
        let abs = |x: f64, y: f64| {
            if cmd.relative {
                Point::new(pos.x + x, pos.y + y)
            } else {
                Point::new(x, y)
            }
        };

        match cmd.kind {
            CommandKind::MoveTo => {
                finish_subpath(core::mem::take(&mut current), &mut subpaths);
                pos = abs(a[0], a[1]);
                start = pos;
                current.push(pos);
                last_control = LastControl::None;
            }
            CommandKind::LineTo => {
                pos = abs(a[0], a[1]);
                current.push(pos);
                last_control = LastControl::None;
            }
            CommandKind::HorizontalLineTo => {
                pos.x = if cmd.relative { pos.x + a[0] } else { a[0] };
                current.push(pos);
                last_control = LastControl::None;
            }
            CommandKind::VerticalLineTo => {
                pos.y = if cmd.relative { pos.y + a[0] } else { a[0] };
                current.push(pos);
                last_control = LastControl::None;
            }
            CommandKind::CubicTo | CommandKind::SmoothCubicTo => {
                let (c1, rest) = if cmd.kind == CommandKind::CubicTo {
                    (abs(a[0], a[1]), &a[2..])
                } else {
                    let c1 = match last_control {
                        LastControl::Cubic(c) => pos + (pos - c),
                        _ => pos,
                    };
                    (c1, a)
                };
                let c2 = abs(rest[0], rest[1]);
                let end = abs(rest[2], rest[3]);
                current.extend(flatten_cubic(pos, c1, c2, end).into_iter().skip(1));
                pos = end;
                last_control = LastControl::Cubic(c2);
            }
            CommandKind::QuadTo | CommandKind::SmoothQuadTo => {
                let (c, end) = if cmd.kind == CommandKind::QuadTo {
                    (abs(a[0], a[1]), abs(a[2], a[3]))
                } else {
                    let c = match last_control {
                        LastControl::Quad(c) => pos + (pos - c),
                        _ => pos,
                    };
                    (c, abs(a[0], a[1]))
                };
                current.extend(flatten_quad(pos, c, end).into_iter().skip(1));
                pos = end;
                last_control = LastControl::Quad(c);
            }
            CommandKind::ArcTo => {
                let arc = EndpointArc {
                    from: pos,
                    to: abs(a[5], a[6]),
                    radii: Vec2::new(a[0], a[1]),
                    x_rotation: a[2],
                    large_arc: a[3] != 0.0,
                    sweep: a[4] != 0.0,
                };
                current.extend(flatten_arc(&arc).into_iter().skip(1));
                pos = arc.to;
                last_control = LastControl::None;
            }
            CommandKind::ClosePath => {
                if !current.is_empty() {
                    current.push(start);
                }
                pos = start;
                last_control = LastControl::None;
            }
        }
    }
    finish_subpath(current, &mut subpaths);

    if subpaths.iter().any(Subpath::has_non_finite) {
        warn!("path data produced non-finite coordinates");
    }
    subpaths
}

fn finish_subpath(points: Vec<Point>, subpaths: &mut Vec<Subpath>) {
    if points.len() >= 2 {
        subpaths.push(Subpath::new(points));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse_path;

    #[test]
    fn winding_of_square() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ];
        assert_eq!(winding_direction(&square), 1);

        let mut reversed = square;
        reversed.reverse();
        assert_eq!(winding_direction(&reversed), -1);
    }

    #[test]
    fn degenerate_winding_is_positive() {
        assert_eq!(winding_direction(&[]), 1);
        assert_eq!(
            winding_direction(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]),
            1
        );
        let line = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 10.0),
        ];
        assert_eq!(winding_direction(&line), 1);
    }

    #[test]
    fn cubic_endpoints_are_exact() {
        let p0 = Point::new(0.3, 0.7);
        let p3 = Point::new(97.1, 13.9);
        let points = flatten_cubic(p0, Point::new(20.0, 80.0), Point::new(60.0, -40.0), p3);
        assert!(points.len() > 2);
        assert_eq!(points[0], p0);
        assert_eq!(*points.last().unwrap(), p3);
    }

    #[test]
    fn quad_endpoints_are_exact() {
        let p0 = Point::new(1.0, 2.0);
        let p2 = Point::new(50.5, 3.25);
        let points = flatten_quad(p0, Point::new(25.0, 60.0), p2);
        assert!(points.len() > 2);
        assert_eq!(points[0], p0);
        assert_eq!(*points.last().unwrap(), p2);
    }

    #[test]
    fn straight_cubic_stays_two_points() {
        let points = flatten_cubic(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        );
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn subdivision_depth_is_bounded() {
        let nan = Point::new(f64::NAN, f64::NAN);
        let points = flatten_cubic(Point::ZERO, nan, nan, Point::new(10.0, 10.0));
        assert_eq!(points.len(), (1 << MAX_SUBDIVISION_DEPTH) + 1);
        assert_eq!(*points.last().unwrap(), Point::new(10.0, 10.0));
    }

    #[test]
    fn arc_ends_at_endpoint() {
        let arc = EndpointArc {
            from: Point::new(0.0, 0.0),
            to: Point::new(20.0, 0.0),
            radii: Vec2::new(10.0, 10.0),
            x_rotation: 0.0,
            large_arc: false,
            sweep: true,
        };
        let points = flatten_arc(&arc);
        assert_eq!(points.len(), ARC_STEPS + 1);
        assert_eq!(points[0], arc.from);
        assert_eq!(points[ARC_STEPS], arc.to);
        // With sweep set, the half circle bulges towards negative y.
        let mid = points[ARC_STEPS / 2];
        assert!((mid.x - 10.0).abs() < 1e-9);
        assert!((mid.y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn arc_radii_are_scaled_up() {
        let arc = EndpointArc {
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 0.0),
            radii: Vec2::new(1.0, 1.0),
            x_rotation: 0.0,
            large_arc: false,
            sweep: false,
        };
        let points = flatten_arc(&arc);
        let mid = points[ARC_STEPS / 2];
        assert!((mid.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_arcs() {
        let mut arc = EndpointArc {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 5.0),
            radii: Vec2::new(0.0, 10.0),
            x_rotation: 0.0,
            large_arc: false,
            sweep: false,
        };
        assert_eq!(flatten_arc(&arc), vec![arc.from, arc.to]);
        arc.to = arc.from;
        arc.radii = Vec2::new(5.0, 5.0);
        assert_eq!(flatten_arc(&arc), vec![arc.from]);
    }

    #[test]
    fn closed_rectangle_path() {
        let subpaths = flatten_commands(&parse_path("M0,0 H10 V10 H0 Z"));
        assert_eq!(subpaths.len(), 1);
        let points = &subpaths[0].points;
        assert_eq!(points.len(), 5);
        assert_eq!(points.first(), points.last());
        assert!(subpaths[0].is_closed());
        assert_eq!(subpaths[0].winding, 1);
    }

    #[test]
    fn donut_has_two_subpaths_with_opposite_winding() {
        let subpaths =
            flatten_commands(&parse_path("M 10,10 h80 v80 h-80 z M 30,30 v40 h40 v-40 z"));
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[0].winding, 1);
        assert_eq!(subpaths[1].winding, -1);
    }

    #[test]
    fn relative_commands_accumulate() {
        let subpaths = flatten_commands(&parse_path("m10 10 l5 0 v5 h-5 z"));
        assert_eq!(
            subpaths[0].points,
            vec![
                Point::new(10.0, 10.0),
                Point::new(15.0, 10.0),
                Point::new(15.0, 15.0),
                Point::new(10.0, 15.0),
                Point::new(10.0, 10.0),
            ]
        );
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let explicit =
            flatten_commands(&parse_path("M0 0 C 0 10 10 10 10 0 C 10 -10 20 -10 20 0"));
        let smooth = flatten_commands(&parse_path("M0 0 C 0 10 10 10 10 0 S 20 -10 20 0"));
        assert_eq!(explicit, smooth);
    }

    #[test]
    fn smooth_quad_without_previous_quad_is_a_line() {
        let subpaths = flatten_commands(&parse_path("M0 0 T 10 0"));
        let points = &subpaths[0].points;
        // The control point sits on the start point, so the curve is straight but not
        // uniformly parametrized and may still be subdivided.
        assert_eq!(points.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(points.last(), Some(&Point::new(10.0, 0.0)));
        assert!(points.iter().all(|p| p.y == 0.0));
        assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn lone_moveto_is_dropped() {
        assert!(flatten_commands(&parse_path("M 5 5")).is_empty());
        let subpaths = flatten_commands(&parse_path("M 5 5 M 0 0 L 1 1"));
        assert_eq!(subpaths.len(), 1);
    }

    #[test]
    fn transform_recomputes_winding() {
        let subpath = flatten_commands(&parse_path("M0,0 H10 V10 H0 Z")).remove(0);
        let mirrored = subpath.transform(Affine::scale_non_uniform(-1.0, 1.0));
        assert_eq!(mirrored.winding, -1);
    }
}
