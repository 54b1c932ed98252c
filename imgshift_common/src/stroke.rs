// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expanding polylines into fillable stroke outlines.
//!
//! The outline is not a single polygon: each segment becomes a quad, every interior vertex gets
//! a round join and the open ends get caps. All pieces are meant to be filled together with the
//! non-zero rule, which unions them.

use crate::flatten::Subpath;
use crate::kurbo::{Cap, Point, Stroke, Vec2};
use core::f64::consts::{PI, TAU};

/// Number of segments a round cap is approximated with.
pub const CAP_STEPS: usize = 8;
/// Number of segments a join circle is approximated with.
pub const JOIN_STEPS: usize = 12;

/// Expand a polyline into stroke polygons.
///
/// Only the width and the caps of `stroke` are used; joins are always round and dashing is
/// not supported. A polyline whose last point equals its first is treated as closed: the
/// closing vertex gets a join instead of two caps. Zero-length segments contribute nothing,
/// and a polyline without any segment of positive length produces no geometry.
pub fn stroke_polyline(points: &[Point], stroke: &Stroke) -> Vec<Subpath> {
    let half = stroke.width * 0.5;
    if points.len() < 2 || half.is_nan() || half <= 0.0 {
        return Vec::new();
    }

    let mut polygons = Vec::new();
    let mut any_segment = false;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let Some(normal) = unit_normal(a, b) else {
            continue;
        };
        any_segment = true;
        let offset = normal * half;
        polygons.push(Subpath::new(vec![
            a + offset,
            b + offset,
            b - offset,
            a - offset,
        ]));
    }
    if !any_segment {
        return Vec::new();
    }

    let closed = points.len() > 2 && points.first() == points.last();
    let last = points.len() - 1;
    for (i, vertex) in points.iter().enumerate() {
        let interior = i > 0 && i < last;
        // For closed polylines the first and last point are the same vertex; join it once.
        if interior || (closed && i == 0) {
            polygons.push(circle(*vertex, half, JOIN_STEPS));
        }
    }

    if !closed {
        if let Some(start) = end_cap(points.iter().copied(), half, stroke.start_cap) {
            polygons.push(start);
        }
        if let Some(end) = end_cap(points.iter().rev().copied(), half, stroke.end_cap) {
            polygons.push(end);
        }
    }

    polygons
}

/// The unit normal of the segment from `a` to `b`, or `None` if it has no length.
fn unit_normal(a: Point, b: Point) -> Option<Vec2> {
    let d = b - a;
    let len = d.hypot();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    Some(Vec2::new(-d.y / len, d.x / len))
}

/// The cap at the first point of `points`, oriented away from the first segment of positive
/// length.
fn end_cap(mut points: impl Iterator<Item = Point>, half: f64, cap: Cap) -> Option<Subpath> {
    let end = points.next()?;
    let next = points.find(|p| *p != end)?;
    let d = end - next;
    let len = d.hypot();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    let outward = d / len;
    let normal = Vec2::new(-outward.y, outward.x) * half;

    match cap {
        Cap::Butt => None,
        Cap::Square => {
            let ext = outward * half;
            Some(Subpath::new(vec![
                end + normal,
                end + normal + ext,
                end - normal + ext,
                end - normal,
            ]))
        }
        Cap::Round => {
            // `normal` is `outward` turned a quarter counter-clockwise, so sweeping clockwise
            // from it passes through the outward tip.
            let base = normal.atan2();
            let points = (0..=CAP_STEPS)
                .map(|i| {
                    let angle = base - PI * i as f64 / CAP_STEPS as f64;
                    end + Vec2::from_angle(angle) * half
                })
                .collect();
            Some(Subpath::new(points))
        }
    }
}

fn circle(center: Point, radius: f64, steps: usize) -> Subpath {
    let points = (0..steps)
        .map(|i| center + Vec2::from_angle(TAU * i as f64 / steps as f64) * radius)
        .collect();
    Subpath::new(points)
}
