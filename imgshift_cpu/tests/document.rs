// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::util::{covered, pixel, render_svg, rgba, svg, BLUE, RED};
use imgshift_common::color::{TRANSPARENT, WHITE};
use imgshift_common::kurbo::{Affine, Point};
use imgshift_cpu::{render_document, DocumentRenderer, Pixmap, ResolvedPaint, TextRenderer};
use imgshift_svg::{Document, TextSpan};

#[test]
fn viewbox_is_stretched_over_the_canvas() {
    let doc = Document::parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 100 100">
            <rect width="50" height="50" fill="red"/>
        </svg>"#,
    )
    .unwrap();
    let pixmap = render_document(&doc, 20, 20, WHITE).unwrap();
    assert_eq!(pixel(&pixmap, 9, 9), RED);
    assert_eq!(pixel(&pixmap, 10, 10), WHITE);
    assert_eq!(covered(&pixmap, WHITE).len(), 100);
}

#[test]
fn viewbox_origin_is_moved_to_the_corner() {
    let pixmap = render_svg(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="50 50 10 10">
            <rect x="50" y="50" width="2" height="2" fill="blue"/>
        </svg>"#,
    );
    assert_eq!(pixel(&pixmap, 0, 0), BLUE);
    assert_eq!(pixel(&pixmap, 2, 2), WHITE);
}

#[test]
fn background_is_configurable() {
    let doc = Document::parse(&svg(3, 2, "")).unwrap();
    let pixmap = render_document(&doc, 3, 2, TRANSPARENT).unwrap();
    assert!(pixmap.data().iter().all(|p| *p == TRANSPARENT));
    let pixmap = render_document(&doc, 3, 2, rgba(1, 2, 3, 4)).unwrap();
    assert_eq!(pixel(&pixmap, 2, 1), rgba(1, 2, 3, 4));
}

#[test]
fn group_transforms_apply_to_children() {
    let pixmap = render_svg(&svg(
        10,
        10,
        r#"<g transform="translate(4 0)"><rect transform="scale(2)" width="1" height="1" fill="red"/></g>"#,
    ));
    assert_eq!(covered(&pixmap, WHITE), [(4, 0), (5, 0), (4, 1), (5, 1)]);
}

#[test]
fn fill_rule_attribute_is_used() {
    let pixmap = render_svg(&svg(
        20,
        20,
        r#"<path fill-rule="evenodd" fill="red" d="M0 0H20V20H0Z M5 5H15V15H5Z"/>"#,
    ));
    assert_eq!(pixel(&pixmap, 2, 2), RED);
    assert_eq!(pixel(&pixmap, 10, 10), WHITE);
}

#[test]
fn shapes_render_in_document_order() {
    let pixmap = render_svg(&svg(
        4,
        4,
        r#"<rect width="4" height="4" fill="red"/><circle cx="2" cy="2" r="1" fill="blue"/>"#,
    ));
    assert_eq!(pixel(&pixmap, 0, 0), RED);
    assert_eq!(pixel(&pixmap, 1, 1), BLUE);
}

#[test]
fn curves_are_filled() {
    let pixmap = render_svg(&svg(
        20,
        20,
        r#"<path fill="red" d="M0 10 C0 -3 20 -3 20 10 Z"/>"#,
    ));
    assert_eq!(pixel(&pixmap, 10, 5), RED);
    assert_eq!(pixel(&pixmap, 10, 15), WHITE);
}

#[derive(Default)]
struct RecordingTextRenderer {
    runs: Vec<(String, Affine)>,
}

impl TextRenderer for RecordingTextRenderer {
    fn draw_text(
        &mut self,
        text: &TextSpan,
        transform: Affine,
        paint: &ResolvedPaint,
        target: &mut Pixmap,
    ) {
        self.runs.push((text.content.clone(), transform));
        let origin = transform * text.origin;
        target.blend_pixel(
            origin.x as i64,
            origin.y as i64,
            paint.color_at(Point::new(origin.x, origin.y)),
        );
    }
}

#[test]
fn text_goes_to_the_text_renderer() {
    let doc = Document::parse(&svg(
        10,
        10,
        r#"<g transform="translate(1 2)"><text x="3" y="4" fill="blue">Hi</text></g>"#,
    ))
    .unwrap();

    let without = render_document(&doc, 10, 10, WHITE).unwrap();
    assert!(without.data().iter().all(|p| *p == WHITE));

    let mut text_renderer = RecordingTextRenderer::default();
    let with = DocumentRenderer::new(&doc)
        .with_text_renderer(&mut text_renderer)
        .render(10, 10, WHITE)
        .unwrap();
    assert_eq!(pixel(&with, 4, 6), BLUE);
    assert_eq!(
        text_renderer.runs,
        [("Hi".to_owned(), Affine::translate((1.0, 2.0)))]
    );
}
