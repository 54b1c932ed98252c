// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imgshift renders SVG documents to RGBA pixels.
//!
//! Two engines are available behind the [`Engine`] trait:
//!
//! - The reference engine, [`imgshift_cpu`], is always built. It supports a subset of SVG
//!   (basic shapes, paths, groups, solid colors, and linear and radial gradients) and produces
//!   aliased output.
//! - The production engine uses `resvg` and is only available with the `resvg` feature.
//!
//! In [`EngineMode::Auto`], the default, the production engine is tried first and the
//! reference engine is used when it is unavailable or fails. Such fallbacks are reported as
//! [`Diagnostic`]s in the result, and logged with the [`log`] crate.
//!
//! # Example
//!
//! ```
//! use imgshift::{render, EngineMode, RenderOptions};
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
//!     <circle cx="5" cy="5" r="4" fill="green"/>
//! </svg>"#;
//! let options = RenderOptions {
//!     width: Some(20),
//!     mode: EngineMode::Reference,
//!     ..RenderOptions::default()
//! };
//! let rendered = render(svg, &options).unwrap();
//! assert_eq!((rendered.image.width(), rendered.image.height()), (20, 20));
//! assert_eq!(rendered.image.pixel(10, 10), Some([0, 128, 0, 255]));
//! ```
//!
//! [`log`]: https://docs.rs/log
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![forbid(unsafe_code)]

mod dispatch;
mod engine;
mod error;
mod image;
mod options;

pub use dispatch::{Diagnostic, Dispatcher, Rendered};
pub use engine::{Engine, ProductionEngine, ReferenceEngine};
pub use error::Error;
pub use image::RgbaImage;
pub use options::{EngineMode, RenderOptions};

pub use imgshift_common;
pub use imgshift_cpu;
pub use imgshift_svg;

/// Render `source` (markup, or the path of a file containing markup) with the default
/// engines.
pub fn render(source: &str, options: &RenderOptions) -> Result<Rendered, Error> {
    Dispatcher::new().render(source, options)
}
