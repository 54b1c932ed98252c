// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paints prepared for sampling at pixel centers.

use imgshift_common::color::{with_opacity, Rgba8};
use imgshift_common::kurbo::{Affine, Point, Rect};
use imgshift_common::paint::{GradientUnits, Paint};
use imgshift_common::transform::invert_or_identity;

/// A paint together with the mapping from pixel coordinates into its own space.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPaint {
    paint: Paint,
    pixel_to_paint: Affine,
    opacity: f64,
}

impl ResolvedPaint {
    /// Prepare `paint` for an element drawn with `transform` (user space to pixels).
    ///
    /// Gradients in bounding box units are mapped onto `bbox`, the element's box in its own
    /// user space. Degenerate box dimensions count as 1. The alpha of every sampled color is
    /// scaled by `opacity`.
    pub fn new(paint: Paint, transform: Affine, bbox: Option<Rect>, opacity: f64) -> Self {
        let pixel_to_paint = match paint.gradient_base() {
            None => Affine::IDENTITY,
            Some(base) => {
                let pixel_to_user = invert_or_identity(&transform);
                let user_to_units = match (base.units, bbox) {
                    (GradientUnits::ObjectBoundingBox, Some(bbox)) => user_to_unit_square(bbox),
                    _ => Affine::IDENTITY,
                };
                invert_or_identity(&base.transform) * user_to_units * pixel_to_user
            }
        };
        Self {
            paint,
            pixel_to_paint,
            opacity,
        }
    }

    /// The paint being sampled.
    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// The matrix mapping pixel coordinates into paint space.
    pub fn pixel_to_paint(&self) -> Affine {
        self.pixel_to_paint
    }

    /// The color at the pixel coordinate `p`.
    pub fn color_at(&self, p: Point) -> Rgba8 {
        let color = match &self.paint {
            Paint::Solid(color) => *color,
            paint => paint.color_at(self.pixel_to_paint * p),
        };
        with_opacity(color, self.opacity)
    }
}

/// Translate the box origin to zero, then scale the box to the unit square.
fn user_to_unit_square(bbox: Rect) -> Affine {
    let extent = |v: f64| if v > 0.0 { v } else { 1.0 };
    Affine::translate((-bbox.x0, -bbox.y0))
        .then_scale_non_uniform(1.0 / extent(bbox.width()), 1.0 / extent(bbox.height()))
}
