// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color parsing and constants.
//!
//! Colors are stored as straight (non-premultiplied) 8-bit sRGB, which is what the pixmap
//! blends in.

use log::warn;
use peniko::color::{parse_color as parse_css_color, DynamicColor, Srgb};

pub use peniko::color::Rgba8;

/// Fully transparent black.
pub const TRANSPARENT: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};
/// Opaque black.
pub const BLACK: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};
/// Opaque white.
pub const WHITE: Rgba8 = Rgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

/// Parse a CSS color.
///
/// Returns `None` for `none`. Named colors, hex notation and the functional notations are
/// supported; anything that cannot be parsed is black.
pub fn parse_color(color: &str) -> Option<Rgba8> {
    let color = color.trim();
    if color.eq_ignore_ascii_case("none") {
        return None;
    }
    if color.eq_ignore_ascii_case("transparent") {
        return Some(TRANSPARENT);
    }
    match parse_css_color(color) {
        Ok(c) => Some(to_rgba8(c)),
        Err(e) => {
            warn!("invalid color {color:?} ({e}), using black");
            Some(BLACK)
        }
    }
}

fn to_rgba8(color: DynamicColor) -> Rgba8 {
    color.to_alpha_color::<Srgb>().to_rgba8()
}

/// Scale the alpha channel of `color` by `factor`, truncating.
pub fn with_opacity(color: Rgba8, factor: f64) -> Rgba8 {
    let factor = if factor.is_nan() {
        1.0
    } else {
        factor.clamp(0.0, 1.0)
    };
    Rgba8 {
        a: (f64::from(color.a) * factor) as u8,
        ..color
    }
}
