// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors that can occur while rendering.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The production engine cannot be used in this build or environment.
    #[error("Production engine unavailable: {0}")]
    EngineUnavailable(String),
    /// An engine was available but could not render the document.
    #[error("The {engine} engine failed to render: {reason}")]
    RenderFailed {
        /// Name of the failing engine.
        engine: &'static str,
        /// What went wrong.
        reason: String,
    },
    /// The document could not be parsed.
    #[error("Couldn't parse document")]
    Parse(#[from] imgshift_svg::Error),
    /// The source file could not be read.
    #[error("Couldn't read source file")]
    Io(#[from] std::io::Error),
    /// The requested or intrinsic output size has no pixels, or too many to allocate.
    #[error("Invalid output size {width}x{height}")]
    InvalidDimensions {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Pixel data does not match the size of the image.
    #[error("Expected {expected} bytes of pixel data, got {actual}")]
    DataLength {
        /// `width * height * 4`.
        expected: usize,
        /// Length of the data given.
        actual: usize,
    },
    /// An engine mode string was not recognized.
    #[error("Invalid engine mode {0:?}, expected \"reference\", \"production\" or \"auto\"")]
    InvalidMode(String),
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
