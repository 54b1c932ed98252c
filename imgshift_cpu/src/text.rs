// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary to an external text renderer.

use crate::paint::ResolvedPaint;
use imgshift_common::kurbo::Affine;
use imgshift_common::pixmap::Pixmap;
use imgshift_svg::TextSpan;

/// Draws text runs, which the renderer has no glyph outlines for.
///
/// Without an installed text renderer, text elements are skipped.
pub trait TextRenderer {
    /// Draw `text` into `target`.
    ///
    /// `transform` maps the user space of the text (where its origin is given) to pixels, and
    /// `paint` is the fill of the text element, to be sampled at pixel coordinates.
    fn draw_text(
        &mut self,
        text: &TextSpan,
        transform: Affine,
        paint: &ResolvedPaint,
        target: &mut Pixmap,
    );
}
