// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering of whole documents.

use crate::layer::LayerError;
use crate::render::RenderContext;
use crate::text::TextRenderer;
use imgshift_common::color::Rgba8;
use imgshift_common::kurbo::{Affine, Stroke};
use imgshift_common::pixmap::Pixmap;
use imgshift_svg::{Document, Element, ElementKind, TextSpan};
use log::debug;

/// Render `document` onto a canvas of `width` by `height` pixels filled with `background`.
///
/// Text elements are skipped; use [`DocumentRenderer`] to install a [`TextRenderer`].
pub fn render_document(
    document: &Document,
    width: u32,
    height: u32,
    background: Rgba8,
) -> Result<Pixmap, LayerError> {
    DocumentRenderer::new(document).render(width, height, background)
}

/// Renders a [`Document`] element by element, in document order.
pub struct DocumentRenderer<'a> {
    document: &'a Document,
    text_renderer: Option<&'a mut dyn TextRenderer>,
}

impl core::fmt::Debug for DocumentRenderer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DocumentRenderer")
            .field("document", &self.document)
            .field("text_renderer", &self.text_renderer.is_some())
            .finish()
    }
}

impl<'a> DocumentRenderer<'a> {
    /// Create a renderer for `document`.
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            text_renderer: None,
        }
    }

    /// Send text elements to `text_renderer`.
    pub fn with_text_renderer(mut self, text_renderer: &'a mut dyn TextRenderer) -> Self {
        self.text_renderer = Some(text_renderer);
        self
    }

    /// Render onto a canvas of `width` by `height` pixels filled with `background`.
    ///
    /// The viewport of the document is stretched over the whole canvas.
    pub fn render(
        &mut self,
        width: u32,
        height: u32,
        background: Rgba8,
    ) -> Result<Pixmap, LayerError> {
        let mut ctx = RenderContext::with_background(width, height, background);
        let document = self.document;
        let viewport = document.viewport_transform(width, height);
        for element in &document.elements {
            self.draw_element(&mut ctx, element, viewport)?;
        }
        ctx.finish()
    }

    fn draw_element(
        &mut self,
        ctx: &mut RenderContext,
        element: &Element,
        viewport: Affine,
    ) -> Result<(), LayerError> {
        match &element.kind {
            ElementKind::Group(children) => {
                let opacity = element.style.opacity;
                let isolated = opacity < 1.0;
                if isolated {
                    ctx.push_opacity_layer(opacity);
                }
                for child in children {
                    self.draw_element(ctx, child, viewport)?;
                }
                if isolated {
                    ctx.pop_layer()?;
                }
            }
            ElementKind::Text(text) => self.draw_text(ctx, element, text, viewport),
            _ => self.draw_shape(ctx, element, viewport),
        }
        Ok(())
    }

    fn draw_shape(&self, ctx: &mut RenderContext, element: &Element, viewport: Affine) {
        let subpaths = element.subpaths();
        if subpaths.is_empty() {
            return;
        }
        let style = &element.style;
        ctx.set_transform(viewport * element.transform);
        ctx.set_paint_bbox(element.bbox());

        if let Some(fill) = self.document.resolve_paint(&style.fill) {
            ctx.set_paint(fill);
            ctx.set_paint_opacity(style.fill_opacity * style.opacity);
            ctx.set_fill_rule(style.fill_rule);
            ctx.fill_path(&subpaths);
        }

        if style.stroke_width > 0.0 {
            if let Some(stroke) = self.document.resolve_paint(&style.stroke) {
                ctx.set_paint(stroke);
                ctx.set_paint_opacity(style.stroke_opacity * style.opacity);
                ctx.set_stroke(
                    Stroke::new(style.stroke_width)
                        .with_caps(style.line_cap)
                        .with_join(style.line_join),
                );
                ctx.stroke_path(&subpaths);
            }
        }
    }

    fn draw_text(
        &mut self,
        ctx: &mut RenderContext,
        element: &Element,
        text: &TextSpan,
        viewport: Affine,
    ) {
        let Some(renderer) = self.text_renderer.as_deref_mut() else {
            debug!("no text renderer installed, skipping {:?}", text.content);
            return;
        };
        let Some(fill) = self.document.resolve_paint(&element.style.fill) else {
            return;
        };
        ctx.set_transform(viewport * element.transform);
        ctx.set_paint(fill);
        ctx.set_paint_opacity(element.style.fill_opacity * element.style.opacity);
        ctx.set_paint_bbox(element.bbox());
        ctx.draw_text(text, renderer);
    }
}
