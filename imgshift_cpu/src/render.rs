// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic render operations.

use crate::hairline::draw_hairline;
use crate::layer::{LayerError, LayerStack};
use crate::paint::ResolvedPaint;
use crate::raster::fill_subpaths;
use crate::text::TextRenderer;
use imgshift_common::color::{Rgba8, BLACK, TRANSPARENT};
use imgshift_common::flatten::Subpath;
use imgshift_common::kurbo::{Affine, Cap, Join, Point, Rect, Stroke};
use imgshift_common::paint::Paint;
use imgshift_common::peniko::Fill;
use imgshift_common::pixmap::Pixmap;
use imgshift_common::stroke::stroke_polyline;
use imgshift_svg::TextSpan;

/// A render context.
///
/// Geometry is given in user space and mapped to pixels with the current transform. Drawing
/// goes to the topmost pushed layer, or to the canvas when no layer is pushed.
#[derive(Debug)]
pub struct RenderContext {
    width: u32,
    height: u32,
    pixmap: Pixmap,
    layers: LayerStack,
    paint: Paint,
    paint_opacity: f64,
    paint_bbox: Option<Rect>,
    stroke: Stroke,
    transform: Affine,
    fill_rule: Fill,
}

impl RenderContext {
    /// Create a new render context with a transparent canvas of the given size in pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, TRANSPARENT)
    }

    /// Create a new render context with a canvas filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Rgba8) -> Self {
        Self {
            width,
            height,
            pixmap: Pixmap::filled(width, height, background),
            layers: LayerStack::new(width, height),
            paint: BLACK.into(),
            paint_opacity: 1.0,
            paint_bbox: None,
            stroke: Stroke {
                width: 1.0,
                join: Join::Round,
                start_cap: Cap::Butt,
                end_cap: Cap::Butt,
                ..Default::default()
            },
            transform: Affine::IDENTITY,
            fill_rule: Fill::NonZero,
        }
    }

    /// The width of the canvas in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The height of the canvas in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill a shape made of `subpaths` with the current paint and fill rule.
    pub fn fill_path(&mut self, subpaths: &[Subpath]) {
        self.render_polygons(subpaths, self.fill_rule);
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: &Rect) {
        let outline = Subpath::new(vec![
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x0, rect.y0),
        ]);
        self.fill_path(&[outline]);
    }

    /// Stroke `subpaths` with the current paint and stroke.
    ///
    /// The outline is computed in user space, so the stroke width is subject to the current
    /// transform. It is always filled with the non-zero rule.
    pub fn stroke_path(&mut self, subpaths: &[Subpath]) {
        let polygons: Vec<Subpath> = subpaths
            .iter()
            .flat_map(|subpath| stroke_polyline(&subpath.points, &self.stroke))
            .collect();
        self.render_polygons(&polygons, Fill::NonZero);
    }

    /// Draw an anti-aliased line one pixel wide, whatever the current stroke width.
    pub fn stroke_hairline(&mut self, from: Point, to: Point) {
        let paint = self.resolved_paint();
        let target = self.layers.target(&mut self.pixmap);
        draw_hairline(
            target,
            self.transform * from,
            self.transform * to,
            |p| paint.color_at(p),
        );
    }

    /// Hand `text` to `renderer`, together with the current transform and paint.
    pub fn draw_text(&mut self, text: &TextSpan, renderer: &mut dyn TextRenderer) {
        let paint = self.resolved_paint();
        let target = self.layers.target(&mut self.pixmap);
        renderer.draw_text(text, self.transform, &paint, target);
    }

    /// Push a new isolated layer, composited with `opacity` when it is popped.
    pub fn push_opacity_layer(&mut self, opacity: f64) {
        self.layers.push_layer(opacity);
    }

    /// Pop the last pushed layer.
    pub fn pop_layer(&mut self) -> Result<(), LayerError> {
        self.layers.pop_layer(&mut self.pixmap)
    }

    /// The number of layers currently pushed.
    pub fn layer_depth(&self) -> usize {
        self.layers.depth()
    }

    /// Set the current stroke.
    pub fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke = stroke;
    }

    /// Set the current paint.
    pub fn set_paint(&mut self, paint: impl Into<Paint>) {
        self.paint = paint.into();
    }

    /// Set the factor the alpha of the current paint is scaled by.
    pub fn set_paint_opacity(&mut self, opacity: f64) {
        self.paint_opacity = opacity;
    }

    /// Set the user-space box that bounding box gradients are mapped onto.
    pub fn set_paint_bbox(&mut self, bbox: Option<Rect>) {
        self.paint_bbox = bbox;
    }

    /// Set the current fill rule.
    pub fn set_fill_rule(&mut self, fill_rule: Fill) {
        self.fill_rule = fill_rule;
    }

    /// Set the current transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Reset the current transform.
    pub fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
    }

    /// Return the current transform.
    pub fn transform(&self) -> &Affine {
        &self.transform
    }

    /// The current paint, prepared for the current transform.
    pub fn resolved_paint(&self) -> ResolvedPaint {
        ResolvedPaint::new(
            self.paint.clone(),
            self.transform,
            self.paint_bbox,
            self.paint_opacity,
        )
    }

    /// Finish rendering and return the canvas.
    ///
    /// Fails if a pushed layer was never popped.
    pub fn finish(self) -> Result<Pixmap, LayerError> {
        match self.layers.depth() {
            0 => Ok(self.pixmap),
            depth => Err(LayerError::Unbalanced(depth)),
        }
    }

    fn render_polygons(&mut self, subpaths: &[Subpath], fill_rule: Fill) {
        if subpaths.is_empty() {
            return;
        }
        let device: Vec<Subpath> = subpaths
            .iter()
            .map(|subpath| subpath.transform(self.transform))
            .collect();
        let paint = self.resolved_paint();
        let target = self.layers.target(&mut self.pixmap);
        fill_subpaths(target, &device, fill_rule, |p| paint.color_at(p));
    }
}
