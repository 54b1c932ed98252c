// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Imgshift CPU is the reference renderer of Imgshift.
//!
//! It rasterizes an [`imgshift_svg::Document`] into a [`Pixmap`] of straight-alpha RGBA8
//! pixels. Polygons are filled with a scanline algorithm that samples pixel centers, strokes
//! are expanded into polygons before filling, and groups with an opacity below 1 are drawn in
//! isolated layers.
//!
//! The renderer favors predictable output over quality: fills are not anti-aliased, stroke
//! joins are always round, and radial gradients ignore their focal point.
//!
//! # Example
//!
//! ```
//! use imgshift_cpu::render_document;
//! use imgshift_svg::Document;
//! use imgshift_svg::imgshift_common::color::{TRANSPARENT, WHITE};
//!
//! let doc = Document::parse(
//!     r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
//!         <rect x="1" y="1" width="2" height="2" fill="white"/>
//!     </svg>"#,
//! )
//! .unwrap();
//! let pixmap = render_document(&doc, 4, 4, TRANSPARENT).unwrap();
//! assert_eq!(pixmap.pixel(1, 1), Some(WHITE));
//! assert_eq!(pixmap.pixel(0, 0), Some(TRANSPARENT));
//! ```
//!
//! For drawing without a document, use a [`RenderContext`] directly.
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
#![expect(
    clippy::cast_possible_truncation,
    reason = "Pixel coordinates are rounded from f64 and clamped to the canvas before use."
)]

mod document;
mod hairline;
mod layer;
mod paint;
mod raster;
mod render;
mod text;

pub use document::{render_document, DocumentRenderer};
pub use layer::{LayerError, LayerStack};
pub use paint::ResolvedPaint;
pub use render::RenderContext;
pub use text::TextRenderer;

pub use imgshift_common::pixmap::Pixmap;
