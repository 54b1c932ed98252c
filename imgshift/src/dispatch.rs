// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine selection and fallback.

use crate::engine::{Engine, ProductionEngine, ReferenceEngine};
use crate::error::{Error, Result};
use crate::image::RgbaImage;
use crate::options::{EngineMode, RenderOptions};
use log::{info, warn};

/// A non-fatal event that happened while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The production engine was not available, so the reference engine was used.
    ProductionUnavailable(String),
    /// The production engine failed, so the reference engine was used. The output may lack
    /// features the reference engine does not support.
    ProductionFailed(String),
}

/// The result of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered pixels.
    pub image: RgbaImage,
    /// Name of the engine that produced the image.
    pub engine: &'static str,
    /// What went wrong along the way without failing the render.
    pub diagnostics: Vec<Diagnostic>,
}

/// Chooses an engine for each render according to [`RenderOptions::mode`].
pub struct Dispatcher {
    reference: Box<dyn Engine>,
    production: Box<dyn Engine>,
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("reference", &self.reference.name())
            .field("production", &self.production.name())
            .finish()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// A dispatcher over [`ReferenceEngine`] and [`ProductionEngine`].
    pub fn new() -> Self {
        Self::with_engines(Box::new(ReferenceEngine), Box::new(ProductionEngine))
    }

    /// A dispatcher over the given engines.
    pub fn with_engines(reference: Box<dyn Engine>, production: Box<dyn Engine>) -> Self {
        Self {
            reference,
            production,
        }
    }

    /// Render `source`, which is either markup or the path of a file containing markup.
    ///
    /// Markup is recognized by its first non-whitespace character being `<`.
    pub fn render(&self, source: &str, options: &RenderOptions) -> Result<Rendered> {
        let svg = imgshift_svg::load_source(source).map_err(|err| match err {
            imgshift_svg::Error::Io(err) => Error::Io(err),
            other => Error::Parse(other),
        })?;
        self.render_markup(&svg, options)
    }

    /// Render `svg` markup.
    pub fn render_markup(&self, svg: &str, options: &RenderOptions) -> Result<Rendered> {
        match options.mode {
            EngineMode::Reference => run(&*self.reference, svg, options, Vec::new()),
            EngineMode::Production => run(&*self.production, svg, options, Vec::new()),
            EngineMode::Auto => {
                let diagnostic = match self.production.render(svg, options) {
                    Ok(image) => {
                        return Ok(Rendered {
                            image,
                            engine: self.production.name(),
                            diagnostics: Vec::new(),
                        });
                    }
                    Err(Error::EngineUnavailable(reason)) => {
                        warn!(
                            "{} engine unavailable ({reason}), using the {} engine",
                            self.production.name(),
                            self.reference.name()
                        );
                        Diagnostic::ProductionUnavailable(reason)
                    }
                    Err(Error::RenderFailed { reason, .. }) => {
                        warn!(
                            "{} engine failed ({reason}), falling back to the {} engine; \
                             output may have limitations",
                            self.production.name(),
                            self.reference.name()
                        );
                        Diagnostic::ProductionFailed(reason)
                    }
                    Err(err) => return Err(err),
                };
                run(&*self.reference, svg, options, vec![diagnostic])
            }
        }
    }
}

fn run(
    engine: &dyn Engine,
    svg: &str,
    options: &RenderOptions,
    diagnostics: Vec<Diagnostic>,
) -> Result<Rendered> {
    info!("rendering with the {} engine", engine.name());
    let image = engine.render(svg, options)?;
    Ok(Rendered {
        image,
        engine: engine.name(),
        diagnostics,
    })
}
