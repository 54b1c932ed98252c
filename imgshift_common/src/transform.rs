// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms.
//!
//! The matrix type is [`kurbo::Affine`], whose coefficients `[a, b, c, d, e, f]` describe
//!
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```
//!
//! Composition follows the usual convention: `parent * child` applies `child` first, which is
//! what nested groups need. To build a chain in application order, use the `then_*` methods on
//! [`Affine`], e.g. `Affine::translate((10.0, 0.0)).then_scale(2.0)`.

use crate::kurbo::{Affine, Point, Vec2};
use log::debug;

/// Determinants with a smaller magnitude than this are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// A translation by `(tx, ty)`.
pub fn translate(tx: f64, ty: f64) -> Affine {
    Affine::translate(Vec2::new(tx, ty))
}

/// A non-uniform scale.
pub fn scale(sx: f64, sy: f64) -> Affine {
    Affine::scale_non_uniform(sx, sy)
}

/// A rotation by `degrees`, optionally around `center`.
///
/// Rotating around a center is `translate(c) * rotate * translate(-c)`.
pub fn rotate(degrees: f64, center: Option<Point>) -> Affine {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let rotation = Affine::new([cos, sin, -sin, cos, 0.0, 0.0]);
    match center {
        Some(c) if c != Point::ZERO => {
            translate(c.x, c.y) * rotation * translate(-c.x, -c.y)
        }
        _ => rotation,
    }
}

/// A horizontal skew by `degrees`.
pub fn skew_x(degrees: f64) -> Affine {
    Affine::new([1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0])
}

/// A vertical skew by `degrees`.
pub fn skew_y(degrees: f64) -> Affine {
    Affine::new([1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0])
}

/// Whether `affine` has a usable inverse.
pub fn is_invertible(affine: &Affine) -> bool {
    let det = affine.determinant();
    det.is_finite() && det.abs() >= SINGULAR_EPSILON
}

/// Invert `affine`, falling back to the identity for singular matrices.
///
/// A singular matrix collapses the plane onto a line or a point, so there is no way to map
/// device pixels back into its source space.
pub fn invert_or_identity(affine: &Affine) -> Affine {
    if is_invertible(affine) {
        affine.inverse()
    } else {
        debug!("singular transform {affine:?}, using the identity as its inverse");
        Affine::IDENTITY
    }
}

/// Parse a transform list such as `translate(10, 20) rotate(45)`.
///
/// Functions are composed left to right, so the rightmost function is applied to a point
/// first. Unknown functions and functions with malformed arguments contribute the identity.
pub fn parse_transform(transform: &str) -> Affine {
    let mut nt = Affine::IDENTITY;
    for ts in transform.split(')') {
        let ts = ts.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if ts.is_empty() {
            continue;
        }
        let Some((name, args)) = ts.split_once('(') else {
            debug!("did not understand transform {ts:?}");
            continue;
        };
        let Some(vals) = parse_args(args) else {
            debug!("malformed arguments in transform {ts:?}");
            continue;
        };
        nt *= match (name.trim(), vals.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Affine::new([a, b, c, d, e, f]),
            ("translate", &[tx]) => translate(tx, 0.0),
            ("translate", &[tx, ty]) => translate(tx, ty),
            ("scale", &[s]) => scale(s, s),
            ("scale", &[sx, sy]) => scale(sx, sy),
            ("rotate", &[angle]) => rotate(angle, None),
            ("rotate", &[angle, cx, cy]) => rotate(angle, Some(Point::new(cx, cy))),
            ("skewX", &[angle]) => skew_x(angle),
            ("skewY", &[angle]) => skew_y(angle),
            (other, _) => {
                debug!("unsupported transform {other}({args})");
                Affine::IDENTITY
            }
        };
    }
    nt
}

fn parse_args(args: &str) -> Option<Vec<f64>> {
    args.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}
