// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions shared across different tests.

use imgshift_common::color::{Rgba8, TRANSPARENT, WHITE};
use imgshift_common::flatten::Subpath;
use imgshift_common::kurbo::Point;
use imgshift_cpu::{render_document, Pixmap, RenderContext};
use imgshift_svg::Document;

pub(crate) const RED: Rgba8 = rgba(255, 0, 0, 255);
pub(crate) const BLUE: Rgba8 = rgba(0, 0, 255, 255);

pub(crate) const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba8 {
    Rgba8 { r, g, b, a }
}

pub(crate) fn get_ctx(width: u32, height: u32, transparent: bool) -> RenderContext {
    let background = if transparent { TRANSPARENT } else { WHITE };
    RenderContext::with_background(width, height, background)
}

pub(crate) fn render_pixmap(ctx: RenderContext) -> Pixmap {
    ctx.finish().unwrap()
}

/// Render markup onto a white canvas of its intrinsic size.
pub(crate) fn render_svg(svg: &str) -> Pixmap {
    let doc = Document::parse(svg).unwrap();
    let (width, height) = doc.output_size(None, None);
    render_document(&doc, width, height, WHITE).unwrap()
}

/// A closed polygon through `points`.
pub(crate) fn polygon(points: &[(f64, f64)]) -> Subpath {
    let mut points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    Subpath::new(points)
}

/// An axis-aligned square, traced clockwise on screen.
pub(crate) fn square(x: f64, y: f64, size: f64) -> Subpath {
    polygon(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
}

pub(crate) fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> Rgba8 {
    pixmap
        .pixel(x, y)
        .unwrap_or_else(|| panic!("({x}, {y}) is outside the pixmap"))
}

/// The pixels that differ from `background`, as coordinates.
pub(crate) fn covered(pixmap: &Pixmap, background: Rgba8) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    for y in 0..pixmap.height() {
        for x in 0..pixmap.width() {
            if pixel(pixmap, x, y) != background {
                out.push((x, y));
            }
        }
    }
    out
}

pub(crate) fn svg(width: u32, height: u32, content: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">{content}</svg>"#
    )
}
