// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anti-aliased one pixel wide lines, using Xiaolin Wu's algorithm.

use imgshift_common::color::{with_opacity, Rgba8};
use imgshift_common::kurbo::Point;
use imgshift_common::pixmap::Pixmap;

fn fpart(x: f64) -> f64 {
    x - x.floor()
}

fn rfpart(x: f64) -> f64 {
    1.0 - fpart(x)
}

/// Draw a hairline from `p0` to `p1`, given in pixel coordinates.
///
/// `shade` is called with the center of every touched pixel; the alpha of the returned color is
/// scaled by the coverage of that pixel.
pub fn draw_hairline(
    pixmap: &mut Pixmap,
    p0: Point,
    p1: Point,
    mut shade: impl FnMut(Point) -> Rgba8,
) {
    if !(p0.is_finite() && p1.is_finite()) {
        return;
    }
    let steep = (p1.y - p0.y).abs() > (p1.x - p0.x).abs();
    let (mut a, mut b) = (p0, p1);
    if steep {
        a = Point::new(a.y, a.x);
        b = Point::new(b.y, b.x);
    }
    if a.x > b.x {
        core::mem::swap(&mut a, &mut b);
    }
    let dx = b.x - a.x;
    let gradient = if dx == 0.0 { 1.0 } else { (b.y - a.y) / dx };
    let major_limit = i64::from(if steep {
        pixmap.height()
    } else {
        pixmap.width()
    });

    let mut plot = |major: i64, minor: i64, coverage: f64| {
        if coverage <= 0.0 {
            return;
        }
        let (x, y) = if steep { (minor, major) } else { (major, minor) };
        let color = shade(Point::new(x as f64 + 0.5, y as f64 + 0.5));
        pixmap.blend_pixel(x, y, with_opacity(color, coverage));
    };

    let x_start = a.x.round();
    let y_start = a.y + gradient * (x_start - a.x);
    let gap = rfpart(a.x + 0.5);
    let (major_start, minor) = (x_start as i64, y_start.floor() as i64);
    plot(major_start, minor, rfpart(y_start) * gap);
    plot(major_start, minor + 1, fpart(y_start) * gap);

    let x_end = b.x.round();
    let y_end = b.y + gradient * (x_end - b.x);
    let gap = fpart(b.x + 0.5);
    let (major_end, minor) = (x_end as i64, y_end.floor() as i64);
    plot(major_end, minor, rfpart(y_end) * gap);
    plot(major_end, minor + 1, fpart(y_end) * gap);

    // Only the part of the span that lies on the canvas.
    let first = (major_start + 1).max(0);
    let last = major_end.min(major_limit);
    let mut y = y_start + gradient * (first as f64 - x_start);
    for major in first..last {
        let minor = y.floor() as i64;
        plot(major, minor, rfpart(y));
        plot(major, minor + 1, fpart(y));
        y += gradient;
    }
}
