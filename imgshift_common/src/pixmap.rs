// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple pixmap type.

use crate::color::{Rgba8, TRANSPARENT};

/// A pixmap of straight (non-premultiplied) RGBA8 values.
///
/// The only way to draw into a pixmap is [`Pixmap::blend_pixel`], which composites with the
/// source-over operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    /// Width of the pixmap in pixels.
    width: u32,
    /// Height of the pixmap in pixels.
    height: u32,
    /// Buffer of the pixmap in row-major order.
    buf: Vec<Rgba8>,
}

impl Pixmap {
    /// Create a new pixmap with the given width and height in pixels.
    ///
    /// All pixels are initialized to transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Create a new pixmap with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            buf: vec![color; len],
        }
    }

    /// Return the width of the pixmap.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Return the height of the pixmap.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns a reference to the underlying data as straight RGBA8.
    pub fn data(&self) -> &[Rgba8] {
        &self.buf
    }

    /// Consume the pixmap, returning its pixels.
    pub fn into_data(self) -> Vec<Rgba8> {
        self.buf
    }

    /// The pixel at `(x, y)`, or `None` outside the pixmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.buf
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Returns the pixels as a flat `[r, g, b, a, r, g, b, a, ...]` byte vector.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.buf.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect()
    }

    /// Composite `color` over the pixel at `(x, y)`.
    ///
    /// Coordinates outside the pixmap are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba8) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(dst) = self.buf.get_mut(idx) {
            *dst = source_over(color, *dst);
        }
    }

    /// Composite all pixels of `layer` over this pixmap, scaling their alpha by `opacity`.
    ///
    /// Both pixmaps must have the same size; excess pixels of either one are ignored.
    pub fn composite(&mut self, layer: &Self, opacity: f64) {
        let opacity = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        for (dst, src) in self.buf.iter_mut().zip(&layer.buf) {
            let a = (f64::from(src.a) * opacity) as u8;
            if a == 0 {
                continue;
            }
            *dst = source_over(Rgba8 { a, ..*src }, *dst);
        }
    }
}

/// The source-over operator on straight-alpha colors.
///
/// Fully transparent sources leave the destination untouched and fully opaque ones replace it.
/// Otherwise the result is truncated to 8 bits per channel.
pub fn source_over(src: Rgba8, dst: Rgba8) -> Rgba8 {
    // Results that are integers in exact arithmetic must not drop a step to float noise.
    let quantize = |v: f64| (v + 1e-9) as u8;
    match src.a {
        0 => dst,
        255 => src,
        _ => {
            let sa = f64::from(src.a) / 255.0;
            let da = f64::from(dst.a) / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let channel = |s: u8, d: u8| {
                quantize((f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a)
            };
            Rgba8 {
                r: channel(src.r, dst.r),
                g: channel(src.g, dst.g),
                b: channel(src.b, dst.b),
                a: quantize(out_a * 255.0),
            }
        }
    }
}
