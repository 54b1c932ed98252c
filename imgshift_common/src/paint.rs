// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Types for paints.
//!
//! A paint decides the color of a covered pixel. Gradients are sampled in their own coordinate
//! space; mapping device pixels into that space is up to the renderer, which knows the current
//! transform and the bounding box of the painted element.

use crate::color::{Rgba8, TRANSPARENT};
use crate::kurbo::{Affine, Point};
use peniko::Extend;
use smallvec::SmallVec;

/// The color used when a paint reference cannot be resolved.
pub const FALLBACK_COLOR: Rgba8 = Rgba8 {
    r: 128,
    g: 128,
    b: 128,
    a: 255,
};

/// A color stop of a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, usually in `[0, 1]`.
    pub offset: f64,
    /// Color at this position.
    pub color: Rgba8,
}

/// The stops of a gradient, sorted by offset.
pub type Stops = SmallVec<[GradientStop; 4]>;

/// The coordinate system gradient geometry is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientUnits {
    /// Fractions of the painted element's bounding box.
    #[default]
    ObjectBoundingBox,
    /// The user space of the painted element.
    UserSpaceOnUse,
}

/// Properties shared by all gradient kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBase {
    /// Color stops, kept sorted by offset.
    pub stops: Stops,
    /// How positions outside `[0, 1]` are mapped back into it.
    pub extend: Extend,
    /// The coordinate system of the geometry.
    pub units: GradientUnits,
    /// The gradient transform, applied on top of `units`.
    pub transform: Affine,
}

impl GradientBase {
    /// Create a new gradient base, sorting the stops.
    pub fn new(stops: impl IntoIterator<Item = GradientStop>) -> Self {
        let mut base = Self {
            stops: stops.into_iter().collect(),
            extend: Extend::Pad,
            units: GradientUnits::default(),
            transform: Affine::IDENTITY,
        };
        base.sort_stops();
        base
    }

    /// Sort the stops by offset, keeping the document order of equal offsets.
    pub fn sort_stops(&mut self) {
        self.stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
    }

    /// The color at gradient position `t`, after applying the extend mode.
    pub fn color_at(&self, t: f64) -> Rgba8 {
        interpolate(&self.stops, apply_extend(t, self.extend))
    }
}

/// Map a gradient position into `[0, 1]`.
pub fn apply_extend(t: f64, extend: Extend) -> f64 {
    match extend {
        Extend::Pad => t.clamp(0.0, 1.0),
        Extend::Repeat => t.rem_euclid(1.0),
        Extend::Reflect => {
            let t = t.abs() % 2.0;
            if t > 1.0 {
                2.0 - t
            } else {
                t
            }
        }
    }
}

/// Interpolate the color at `t` between sorted stops.
///
/// Positions before the first stop take its color, positions after the last take the last
/// one's. Channels are interpolated independently and truncated.
pub fn interpolate(stops: &[GradientStop], t: f64) -> Rgba8 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (s1, s2) = (pair[0], pair[1]);
        if s1.offset <= t && t <= s2.offset {
            let span = s2.offset - s1.offset;
            if span == 0.0 {
                return s1.color;
            }
            let ratio = (t - s1.offset) / span;
            let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * ratio) as u8;
            return Rgba8 {
                r: lerp(s1.color.r, s2.color.r),
                g: lerp(s1.color.g, s2.color.g),
                b: lerp(s1.color.b, s2.color.b),
                a: lerp(s1.color.a, s2.color.a),
            };
        }
    }
    // Only reachable for a NaN position.
    last.color
}

/// A gradient along the line from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// Position 0 of the gradient.
    pub start: Point,
    /// Position 1 of the gradient.
    pub end: Point,
    /// Stops and shared properties.
    pub base: GradientBase,
}

impl LinearGradient {
    /// The gradient position of `p` (in gradient space): its projection onto the gradient axis.
    ///
    /// A zero-length axis puts every point at position 0.
    pub fn position(&self, p: Point) -> f64 {
        let axis = self.end - self.start;
        let len_sq = axis.hypot2();
        if len_sq == 0.0 {
            return 0.0;
        }
        (p - self.start).dot(axis) / len_sq
    }
}

/// A gradient of concentric circles around `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    /// Center of the circles.
    pub center: Point,
    /// Radius of the circle at position 1.
    pub radius: f64,
    /// The focal point. It is kept for completeness but does not affect sampling: positions
    /// are always distances from `center`.
    pub focal: Point,
    /// Stops and shared properties.
    pub base: GradientBase,
}

impl RadialGradient {
    /// The gradient position of `p` (in gradient space): its distance from the center relative
    /// to the radius.
    ///
    /// A zero radius puts every point at position 0.
    pub fn position(&self, p: Point) -> f64 {
        if self.radius == 0.0 {
            return 0.0;
        }
        (p - self.center).hypot() / self.radius
    }
}

/// What a shape is filled or stroked with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A single color.
    Solid(Rgba8),
    /// A linear gradient.
    LinearGradient(LinearGradient),
    /// A radial gradient.
    RadialGradient(RadialGradient),
}

impl Paint {
    /// The gradient properties, if this is a gradient.
    pub fn gradient_base(&self) -> Option<&GradientBase> {
        match self {
            Self::Solid(_) => None,
            Self::LinearGradient(g) => Some(&g.base),
            Self::RadialGradient(g) => Some(&g.base),
        }
    }

    /// Mutable access to the gradient properties, if this is a gradient.
    pub fn gradient_base_mut(&mut self) -> Option<&mut GradientBase> {
        match self {
            Self::Solid(_) => None,
            Self::LinearGradient(g) => Some(&mut g.base),
            Self::RadialGradient(g) => Some(&mut g.base),
        }
    }

    /// The color at `p`, given in gradient space.
    pub fn color_at(&self, p: Point) -> Rgba8 {
        match self {
            Self::Solid(c) => *c,
            Self::LinearGradient(g) => g.base.color_at(g.position(p)),
            Self::RadialGradient(g) => g.base.color_at(g.position(p)),
        }
    }
}

impl From<Rgba8> for Paint {
    fn from(value: Rgba8) -> Self {
        Self::Solid(value)
    }
}
