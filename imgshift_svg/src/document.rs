// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The parsed document, its viewport, and paint resolution.

use crate::element::Element;
use crate::error::Error;
use crate::parse;
use crate::style::PaintRef;
use imgshift_common::kurbo::{Affine, Rect, Size};
use imgshift_common::paint::{Paint, FALLBACK_COLOR};
use log::warn;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// Return `source` itself if it is markup, i.e. starts with `<` after whitespace, otherwise
/// read the file it names.
pub fn load_source(source: &str) -> Result<Cow<'_, str>, Error> {
    if source.trim_start().starts_with('<') {
        Ok(Cow::Borrowed(source))
    } else {
        Ok(Cow::Owned(std::fs::read_to_string(source)?))
    }
}

/// How many `href` links are followed when looking for inherited gradient stops.
const MAX_HREF_DEPTH: usize = 8;

/// A gradient from the definition table.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDef {
    /// The gradient as declared.
    pub paint: Paint,
    /// The id of the gradient this one links to with `href`, if any.
    pub href: Option<String>,
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Intrinsic width in user units.
    pub width: f64,
    /// Intrinsic height in user units.
    pub height: f64,
    /// The region of user space shown on the canvas.
    pub view_box: Option<Rect>,
    /// Top-level elements in document order.
    pub elements: Vec<Element>,
    /// Gradient definitions by id.
    pub gradients: HashMap<String, GradientDef>,
}

impl Document {
    /// Parse a document from markup text.
    pub fn parse(text: &str) -> Result<Self, Error> {
        parse::parse_document(text)
    }

    /// Read and parse a document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse `source` as markup if it starts with `<` (after whitespace), otherwise read it as a
    /// file path.
    pub fn load(source: &str) -> Result<Self, Error> {
        Self::parse(&load_source(source)?)
    }

    /// The intrinsic size of the document.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The size of the user-space region mapped onto the canvas.
    fn viewport(&self) -> Rect {
        self.view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, self.width, self.height))
    }

    /// The pixel size of the canvas.
    ///
    /// If both targets are given they are used as is. A single target is completed with the
    /// aspect ratio of the viewport. Without targets, the intrinsic size is used.
    pub fn output_size(&self, width: Option<u32>, height: Option<u32>) -> (u32, u32) {
        let viewport = self.viewport();
        let aspect = if viewport.height() > 0.0 {
            viewport.width() / viewport.height()
        } else {
            1.0
        };
        match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, (f64::from(w) / aspect) as u32),
            (None, Some(h)) => ((f64::from(h) * aspect) as u32, h),
            (None, None) => (self.width as u32, self.height as u32),
        }
    }

    /// The transform from root user space to canvas pixels for a canvas of the given size.
    ///
    /// The viewport origin is moved to the canvas origin first, then the viewport is scaled to
    /// fill the canvas.
    pub fn viewport_transform(&self, width: u32, height: u32) -> Affine {
        let viewport = self.viewport();
        let scale = |out: u32, extent: f64| {
            if extent > 0.0 {
                f64::from(out) / extent
            } else {
                1.0
            }
        };
        Affine::translate((-viewport.x0, -viewport.y0)).then_scale_non_uniform(
            scale(width, viewport.width()),
            scale(height, viewport.height()),
        )
    }

    /// Turn a paint reference into a paint.
    ///
    /// Returns `None` for [`PaintRef::None`]. References to unknown ids resolve to a neutral
    /// gray. A gradient without stops takes the stops of the gradient it links to.
    pub fn resolve_paint(&self, paint: &PaintRef) -> Option<Paint> {
        match paint {
            PaintRef::None => None,
            PaintRef::Color(c) => Some(Paint::Solid(*c)),
            PaintRef::Url(id) => {
                let Some(def) = self.gradients.get(id) else {
                    warn!("unresolved paint reference #{id}, using gray");
                    return Some(Paint::Solid(FALLBACK_COLOR));
                };
                let mut paint = def.paint.clone();
                if let Some(base) = paint.gradient_base_mut() {
                    if base.stops.is_empty() {
                        base.stops = self.inherited_stops(def).unwrap_or_default();
                    }
                }
                Some(paint)
            }
        }
    }

    /// Walk the `href` chain of `def` for the first gradient with stops.
    fn inherited_stops(&self, def: &GradientDef) -> Option<imgshift_common::paint::Stops> {
        let mut current = def;
        for _ in 0..MAX_HREF_DEPTH {
            let next = self.gradients.get(current.href.as_deref()?)?;
            if let Some(base) = next.paint.gradient_base() {
                if !base.stops.is_empty() {
                    return Some(base.stops.clone());
                }
            }
            current = next;
        }
        warn!("gradient href chain is too deep or circular");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgshift_common::color::Rgba8;
    use imgshift_common::kurbo::Point;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="10 20 100 50"></svg>"#;

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < 1e-9 && (actual.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got {actual:?}"
        );
    }

    #[test]
    fn output_size_rules() {
        let doc = Document::parse(SQUARE).unwrap();
        assert_eq!(doc.output_size(None, None), (200, 100));
        assert_eq!(doc.output_size(Some(50), Some(60)), (50, 60));
        assert_eq!(doc.output_size(Some(300), None), (300, 150));
        assert_eq!(doc.output_size(None, Some(10)), (20, 10));
    }

    #[test]
    fn viewport_translates_then_scales() {
        let doc = Document::parse(SQUARE).unwrap();
        let m = doc.viewport_transform(200, 100);
        assert_point(m * Point::new(10.0, 20.0), 0.0, 0.0);
        assert_point(m * Point::new(110.0, 70.0), 200.0, 100.0);
    }

    #[test]
    fn unresolved_reference_is_gray() {
        let doc = Document::parse(SQUARE).unwrap();
        assert_eq!(
            doc.resolve_paint(&PaintRef::Url("missing".into())),
            Some(Paint::Solid(FALLBACK_COLOR))
        );
        assert_eq!(doc.resolve_paint(&PaintRef::None), None);
        let red = Rgba8 {
            r: 255,
            g: 0,
            b: 0,
            a: 255,
        };
        assert_eq!(
            doc.resolve_paint(&PaintRef::Color(red)),
            Some(Paint::Solid(red))
        );
    }

    #[test]
    fn markup_sources_are_borrowed() {
        assert!(matches!(load_source(SQUARE), Ok(Cow::Borrowed(s)) if s == SQUARE));
        assert!(matches!(load_source(""), Err(Error::Io(_))));
    }

    #[test]
    fn load_distinguishes_text_and_paths() {
        assert!(Document::load(&format!("  \n{SQUARE}")).is_ok());
        assert!(matches!(
            Document::load("/definitely/not/here.svg"),
            Err(Error::Io(_))
        ));
    }
}
