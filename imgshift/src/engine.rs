// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering engines.

use crate::error::{Error, Result};
use crate::image::RgbaImage;
use crate::options::RenderOptions;
use imgshift_cpu::render_document;
use imgshift_svg::Document;

/// Something that turns markup into pixels.
pub trait Engine {
    /// A short name, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Render `svg` markup at the size requested by `options`.
    ///
    /// Engines ignore [`RenderOptions::mode`].
    fn render(&self, svg: &str, options: &RenderOptions) -> Result<RgbaImage>;
}

/// The built-in renderer of [`imgshift_cpu`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceEngine;

impl Engine for ReferenceEngine {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn render(&self, svg: &str, options: &RenderOptions) -> Result<RgbaImage> {
        let document = Document::parse(svg)?;
        let (width, height) = document.output_size(options.width, options.height);
        check_dimensions(width, height)?;
        let pixmap = render_document(&document, width, height, options.background).map_err(
            |err| Error::RenderFailed {
                engine: self.name(),
                reason: err.to_string(),
            },
        )?;
        Ok(RgbaImage::from_pixmap(&pixmap))
    }
}

/// Largest pixel buffer, in bytes, an engine allocates. Same limit as tiny-skia's.
const MAX_PIXMAP_BYTES: u64 = i32::MAX as u64;

/// Reject canvases without pixels and canvases too large to allocate.
fn check_dimensions(width: u32, height: u32) -> Result<()> {
    let bytes = u64::from(width) * u64::from(height) * 4;
    if width == 0 || height == 0 || bytes > MAX_PIXMAP_BYTES {
        return Err(Error::InvalidDimensions { width, height });
    }
    Ok(())
}

/// The production engine, backed by `resvg` when the `resvg` feature is enabled.
///
/// Without the feature every render reports [`Error::EngineUnavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductionEngine;

impl Engine for ProductionEngine {
    fn name(&self) -> &'static str {
        "production"
    }

    #[cfg(feature = "resvg")]
    fn render(&self, svg: &str, options: &RenderOptions) -> Result<RgbaImage> {
        render_with_resvg(svg, options).map_err(|reason| Error::RenderFailed {
            engine: self.name(),
            reason,
        })
    }

    #[cfg(not(feature = "resvg"))]
    fn render(&self, _svg: &str, _options: &RenderOptions) -> Result<RgbaImage> {
        Err(Error::EngineUnavailable(
            "imgshift was built without the `resvg` feature".into(),
        ))
    }
}

/// The pixel size for a document of `intrinsic` size, following the same rules as the
/// reference renderer.
#[cfg(feature = "resvg")]
fn output_size(intrinsic: (f32, f32), width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    let (w, h) = intrinsic;
    let aspect = if h > 0.0 { w / h } else { 1.0 };
    match (width, height) {
        (Some(width), Some(height)) => (width, height),
        (Some(width), None) => (width, (width as f32 / aspect) as u32),
        (None, Some(height)) => ((height as f32 * aspect) as u32, height),
        (None, None) => (w as u32, h as u32),
    }
}

#[cfg(feature = "resvg")]
fn render_with_resvg(svg: &str, options: &RenderOptions) -> Result<RgbaImage, String> {
    use resvg::{tiny_skia, usvg};

    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|err| format!("failed to parse SVG: {err}"))?;
    let size = tree.size();
    let (width, height) = output_size(
        (size.width(), size.height()),
        options.width,
        options.height,
    );
    let Some(mut pixmap) = tiny_skia::Pixmap::new(width, height) else {
        return Err(format!("couldn't create a {width}x{height} canvas"));
    };
    let bg = options.background;
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));

    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha.
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RgbaImage::new(width, height, data).map_err(|err| err.to_string())
}
