// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::util::{get_ctx, pixel, render_pixmap, render_svg, rgba, svg, BLUE, RED};
use imgshift_common::kurbo::{Affine, Point, Rect};
use imgshift_common::paint::{
    GradientBase, GradientStop, GradientUnits, LinearGradient, Paint, RadialGradient,
    FALLBACK_COLOR,
};
use imgshift_common::peniko::Extend;
use imgshift_cpu::{Pixmap, ResolvedPaint};

fn stops() -> GradientBase {
    let mut base = GradientBase::new([
        GradientStop {
            offset: 0.0,
            color: RED,
        },
        GradientStop {
            offset: 1.0,
            color: BLUE,
        },
    ]);
    base.units = GradientUnits::UserSpaceOnUse;
    base
}

fn linear(x1: f64, x2: f64, extend: Extend) -> Paint {
    let mut base = stops();
    base.extend = extend;
    Paint::LinearGradient(LinearGradient {
        start: Point::new(x1, 0.0),
        end: Point::new(x2, 0.0),
        base,
    })
}

/// Fill a strip with `paint`, offset by half a pixel so that the center of pixel `x` samples
/// the paint at user-space `x`.
fn fill_strip(paint: Paint, width: u32) -> Pixmap {
    let mut ctx = get_ctx(width, 1, true);
    ctx.set_transform(Affine::translate((0.5, 0.0)));
    ctx.set_paint(paint);
    ctx.fill_rect(&Rect::new(-0.5, 0.0, f64::from(width), 1.0));
    render_pixmap(ctx)
}

#[test]
fn linear_midpoint_is_the_average() {
    let paint = ResolvedPaint::new(
        linear(0.0, 100.0, Extend::Pad),
        Affine::IDENTITY,
        None,
        1.0,
    );
    assert_eq!(paint.color_at(Point::new(50.0, 0.0)), rgba(127, 0, 127, 255));

    let pixmap = fill_strip(linear(0.0, 100.0, Extend::Pad), 100);
    assert_eq!(pixel(&pixmap, 0, 0), RED);
    assert_eq!(pixel(&pixmap, 50, 0), rgba(127, 0, 127, 255));
}

#[test]
fn pad_clamps_to_the_end_stops() {
    let pixmap = fill_strip(linear(4.0, 8.0, Extend::Pad), 12);
    assert_eq!(pixel(&pixmap, 1, 0), RED);
    assert_eq!(pixel(&pixmap, 10, 0), BLUE);
}

#[test]
fn repeat_wraps() {
    let pixmap = fill_strip(linear(0.0, 8.0, Extend::Repeat), 12);
    // Position 1.25 wraps to 0.25.
    assert_eq!(pixel(&pixmap, 10, 0), rgba(191, 0, 63, 255));
}

#[test]
fn reflect_mirrors() {
    let pixmap = fill_strip(linear(0.0, 8.0, Extend::Reflect), 12);
    // Position 1.25 folds back to 0.75.
    assert_eq!(pixel(&pixmap, 10, 0), rgba(63, 0, 191, 255));
}

#[test]
fn radial_uses_distance_from_center() {
    let mut base = stops();
    base.extend = Extend::Pad;
    let paint = Paint::RadialGradient(RadialGradient {
        // On the row of pixel centers, so distances are purely horizontal.
        center: Point::new(10.0, 0.5),
        radius: 8.0,
        // The focal point does not move the gradient.
        focal: Point::new(14.0, 0.5),
        base,
    });
    let pixmap = fill_strip(paint, 20);
    assert_eq!(pixel(&pixmap, 10, 0), RED);
    assert_eq!(pixel(&pixmap, 6, 0), rgba(127, 0, 127, 255));
    assert_eq!(pixel(&pixmap, 14, 0), rgba(127, 0, 127, 255));
    assert_eq!(pixel(&pixmap, 19, 0), BLUE);
}

#[test]
fn bounding_box_gradient_follows_the_shape() {
    // The gradient is referenced before it is defined.
    let pixmap = render_svg(&svg(
        40,
        10,
        r#"<rect x="10" width="20" height="10" fill="url(#g)"/>
        <defs>
            <linearGradient id="g">
                <stop offset="0" stop-color="red"/>
                <stop offset="1" stop-color="blue"/>
            </linearGradient>
        </defs>"#,
    ));
    assert_eq!(pixel(&pixmap, 5, 5), rgba(255, 255, 255, 255));
    let left = pixel(&pixmap, 10, 5);
    let right = pixel(&pixmap, 29, 5);
    assert!(left.r > 240 && left.b < 15, "{left:?}");
    assert!(right.b > 240 && right.r < 15, "{right:?}");
}

#[test]
fn gradient_transform_applies() {
    let pixmap = render_svg(&svg(
        20,
        10,
        r#"<linearGradient id="g" gradientUnits="userSpaceOnUse" x2="10"
            gradientTransform="translate(10 0)">
            <stop offset="0" stop-color="red"/>
            <stop offset="1" stop-color="blue"/>
        </linearGradient>
        <rect width="20" height="10" fill="url(#g)"/>"#,
    ));
    assert_eq!(pixel(&pixmap, 5, 5), RED);
    assert_eq!(pixel(&pixmap, 19, 5).b, 242);
}

#[test]
fn unresolved_reference_paints_gray() {
    let pixmap = render_svg(&svg(4, 4, r#"<rect width="4" height="4" fill="url(#nope)"/>"#));
    assert!(pixmap.data().iter().all(|p| *p == FALLBACK_COLOR));
}
