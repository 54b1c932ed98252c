// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::util::{get_ctx, pixel, render_pixmap, render_svg, rgba, svg, BLUE, RED};
use imgshift_common::color::WHITE;
use imgshift_common::kurbo::Rect;

const FULL: &str = r#"<rect width="4" height="4" fill="red"/>"#;
const FULL_HALF: &str = r#"<rect width="4" height="4" fill="red" opacity="0.5"/>"#;

#[test]
fn group_opacity_is_isolated() {
    let isolated = render_svg(&svg(4, 4, &format!(r#"<g opacity="0.5">{FULL}{FULL}</g>"#)));
    let naive = render_svg(&svg(4, 4, &format!("{FULL_HALF}{FULL_HALF}")));

    // The group composites a single opaque red at alpha 127.
    assert_eq!(pixel(&isolated, 1, 1), rgba(255, 128, 128, 255));
    // Each rectangle blends separately, so the white shows through twice as little.
    assert_eq!(pixel(&naive, 1, 1), rgba(255, 64, 64, 255));
    assert_ne!(isolated, naive);
}

#[test]
fn leaf_opacity_scales_fill_alpha() {
    let pixmap = render_svg(&svg(
        4,
        4,
        r#"<rect width="4" height="4" fill="blue" fill-opacity="0.5" opacity="0.5"/>"#,
    ));
    // Blue arrives with alpha 63 (255 * 0.25, truncated).
    assert_eq!(pixel(&pixmap, 0, 0), rgba(192, 192, 255, 255));
}

#[test]
fn nested_layers() {
    let mut ctx = get_ctx(10, 10, false);
    ctx.push_opacity_layer(0.5);
    ctx.set_paint(RED);
    ctx.fill_rect(&Rect::new(0.0, 0.0, 10.0, 5.0));
    ctx.push_opacity_layer(0.5);
    ctx.set_paint(BLUE);
    ctx.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0));
    ctx.pop_layer().unwrap();
    ctx.pop_layer().unwrap();
    let pixmap = render_pixmap(ctx);

    // Bottom half: only the inner layer, with alpha 127 and then 63.
    assert_eq!(pixel(&pixmap, 5, 8), rgba(192, 192, 255, 255));
    // Top half: blue at alpha 127 over red inside the outer layer, then that over white.
    assert_eq!(pixel(&pixmap, 5, 2), rgba(191, 128, 191, 255));
}

#[test]
fn transparent_group_draws_nothing() {
    let pixmap = render_svg(&svg(4, 4, &format!(r#"<g opacity="0">{FULL}</g>"#)));
    assert!(pixmap.data().iter().all(|p| *p == WHITE));
}

#[test]
fn opacity_is_not_inherited_twice() {
    // Children of a half-transparent group are opaque inside the layer.
    let pixmap = render_svg(&svg(
        4,
        4,
        &format!(r#"<g opacity="0.5"><g>{FULL}</g></g>"#),
    ));
    assert_eq!(pixel(&pixmap, 1, 1), rgba(255, 128, 128, 255));
}
