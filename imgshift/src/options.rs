// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options for a render.

use crate::error::Error;
use core::fmt;
use core::str::FromStr;
use imgshift_common::color::{Rgba8, WHITE};

/// Which engine renders a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineMode {
    /// Only the built-in reference renderer.
    Reference,
    /// Only the production engine; its failures are returned as is.
    Production,
    /// The production engine, falling back to the reference renderer when it is unavailable
    /// or fails.
    #[default]
    Auto,
}

impl EngineMode {
    /// The canonical name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Production => "production",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineMode {
    type Err = Error;

    /// Parse a mode name. `python` and `resvg` are accepted as older names of `reference` and
    /// `production`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" | "python" => Ok(Self::Reference),
            "production" | "resvg" => Ok(Self::Production),
            "auto" => Ok(Self::Auto),
            _ => Err(Error::InvalidMode(s.to_owned())),
        }
    }
}

/// Options for [`render`](crate::render).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Output width in pixels. If only one of width and height is given, the other follows
    /// from the aspect ratio of the document.
    pub width: Option<u32>,
    /// Output height in pixels.
    pub height: Option<u32>,
    /// Which engine to use.
    pub mode: EngineMode,
    /// The color the canvas is filled with before drawing.
    pub background: Rgba8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            mode: EngineMode::default(),
            background: WHITE,
        }
    }
}
