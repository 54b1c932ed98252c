// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elements of the document tree and their geometry.

use crate::style::Style;
use core::f64::consts::{FRAC_PI_2, PI, TAU};
use imgshift_common::flatten::{bounds, flatten_commands, Subpath};
use imgshift_common::kurbo::{Affine, Point, Rect, Vec2};
use imgshift_common::path::PathCommand;
use imgshift_common::transform::invert_or_identity;

/// Number of segments each rounded rectangle corner is approximated with.
pub const CORNER_STEPS: usize = 8;
/// Minimum number of segments a circle or ellipse is approximated with.
pub const MIN_ELLIPSE_STEPS: usize = 16;
/// Maximum number of segments a circle or ellipse is approximated with.
pub const MAX_ELLIPSE_STEPS: usize = 4096;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// The `id` attribute, if any.
    pub id: Option<String>,
    /// Maps the element's user space into the document's root space. Already includes the
    /// transforms of all ancestors.
    pub transform: Affine,
    /// The resolved presentation properties.
    pub style: Style,
    /// Geometry and children.
    pub kind: ElementKind,
}

/// The shape of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A rectangle with optionally rounded corners.
    Rect {
        /// The rectangle itself.
        rect: Rect,
        /// Horizontal corner radius.
        rx: f64,
        /// Vertical corner radius.
        ry: f64,
    },
    /// A circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius.
        r: f64,
    },
    /// An axis-aligned ellipse.
    Ellipse {
        /// Center point.
        center: Point,
        /// Horizontal radius.
        rx: f64,
        /// Vertical radius.
        ry: f64,
    },
    /// A single straight segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// An open sequence of segments.
    Polyline(Vec<Point>),
    /// A closed sequence of segments.
    Polygon(Vec<Point>),
    /// Arbitrary path data.
    Path(Vec<PathCommand>),
    /// A group of elements, drawn in order.
    Group(Vec<Element>),
    /// A run of text, which is drawn by an external text renderer if one is available.
    Text(TextSpan),
}

/// The content of a text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// Position of the start of the baseline.
    pub origin: Point,
    /// The text with whitespace collapsed.
    pub content: String,
    /// The requested font family list, verbatim.
    pub font_family: String,
    /// Font size in user units.
    pub font_size: f64,
}

impl TextSpan {
    /// A rough extent of the text, assuming an average advance of 0.6 em.
    pub fn approximate_bounds(&self) -> Rect {
        let width = self.content.chars().count() as f64 * self.font_size * 0.6;
        Rect::new(
            self.origin.x,
            self.origin.y - self.font_size,
            self.origin.x + width,
            self.origin.y,
        )
    }
}

impl Element {
    /// Whether this element has children.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group(_))
    }

    /// The polygons of the element in its own user space.
    ///
    /// Closed shapes end with a copy of their first point. Groups and text have no polygons
    /// of their own, and neither do shapes with a non-positive size.
    pub fn subpaths(&self) -> Vec<Subpath> {
        match &self.kind {
            ElementKind::Rect { rect, rx, ry } => {
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return Vec::new();
                }
                let rx = rx.max(0.0).min(rect.width() / 2.0);
                let ry = ry.max(0.0).min(rect.height() / 2.0);
                let points = if rx > 0.0 && ry > 0.0 {
                    rounded_rect(*rect, rx, ry)
                } else {
                    let mut points = vec![
                        Point::new(rect.x0, rect.y0),
                        Point::new(rect.x1, rect.y0),
                        Point::new(rect.x1, rect.y1),
                        Point::new(rect.x0, rect.y1),
                    ];
                    points.push(points[0]);
                    points
                };
                vec![Subpath::new(points)]
            }
            ElementKind::Circle { center, r } => ellipse(*center, *r, *r),
            ElementKind::Ellipse { center, rx, ry } => ellipse(*center, *rx, *ry),
            ElementKind::Line { from, to } => vec![Subpath::new(vec![*from, *to])],
            ElementKind::Polyline(points) => {
                if points.len() < 2 {
                    return Vec::new();
                }
                vec![Subpath::new(points.clone())]
            }
            ElementKind::Polygon(points) => {
                if points.len() < 2 {
                    return Vec::new();
                }
                let mut points = points.clone();
                if points.first() != points.last() {
                    points.push(points[0]);
                }
                vec![Subpath::new(points)]
            }
            ElementKind::Path(commands) => flatten_commands(commands),
            ElementKind::Group(_) | ElementKind::Text(_) => Vec::new(),
        }
    }

    /// The bounding box of the element in its own user space.
    ///
    /// Returns `None` for elements without geometry.
    pub fn bbox(&self) -> Option<Rect> {
        match &self.kind {
            ElementKind::Rect { rect, .. } => Some(*rect),
            ElementKind::Circle { center, r } => Some(Rect::from_center_size(
                *center,
                (2.0 * r, 2.0 * r),
            )),
            ElementKind::Ellipse { center, rx, ry } => Some(Rect::from_center_size(
                *center,
                (2.0 * rx, 2.0 * ry),
            )),
            ElementKind::Line { from, to } => Some(Rect::from_points(*from, *to)),
            ElementKind::Polyline(points) | ElementKind::Polygon(points) => {
                bounds(points.iter().copied())
            }
            ElementKind::Path(commands) => bounds(
                flatten_commands(commands)
                    .into_iter()
                    .flat_map(|s| s.points.into_iter()),
            ),
            ElementKind::Group(children) => {
                let to_local = invert_or_identity(&self.transform);
                let corners = children.iter().flat_map(|child| {
                    let to_group = to_local * child.transform;
                    child
                        .bbox()
                        .map(|b| {
                            [
                                Point::new(b.x0, b.y0),
                                Point::new(b.x1, b.y0),
                                Point::new(b.x1, b.y1),
                                Point::new(b.x0, b.y1),
                            ]
                            .map(|p| to_group * p)
                        })
                        .into_iter()
                        .flatten()
                });
                bounds(corners)
            }
            ElementKind::Text(span) => Some(span.approximate_bounds()),
        }
    }
}

fn ellipse(center: Point, rx: f64, ry: f64) -> Vec<Subpath> {
    if rx <= 0.0 || ry <= 0.0 || !rx.is_finite() || !ry.is_finite() {
        return Vec::new();
    }
    let steps = ((2.0 * rx.max(ry)) as usize).clamp(MIN_ELLIPSE_STEPS, MAX_ELLIPSE_STEPS);
    let mut points: Vec<Point> = (0..steps)
        .map(|i| {
            let (sin, cos) = (TAU * i as f64 / steps as f64).sin_cos();
            center + Vec2::new(rx * cos, ry * sin)
        })
        .collect();
    points.push(points[0]);
    vec![Subpath::new(points)]
}

fn rounded_rect(rect: Rect, rx: f64, ry: f64) -> Vec<Point> {
    // Corner centers with the angle each quarter arc starts at, clockwise from the top right.
    let corners = [
        (Point::new(rect.x1 - rx, rect.y0 + ry), -FRAC_PI_2),
        (Point::new(rect.x1 - rx, rect.y1 - ry), 0.0),
        (Point::new(rect.x0 + rx, rect.y1 - ry), FRAC_PI_2),
        (Point::new(rect.x0 + rx, rect.y0 + ry), PI),
    ];
    let mut points = Vec::with_capacity(4 * (CORNER_STEPS + 1) + 1);
    for (center, start) in corners {
        for i in 0..=CORNER_STEPS {
            let angle = start + FRAC_PI_2 * i as f64 / CORNER_STEPS as f64;
            let (sin, cos) = angle.sin_cos();
            points.push(center + Vec2::new(rx * cos, ry * sin));
        }
    }
    points.push(points[0]);
    points
}
