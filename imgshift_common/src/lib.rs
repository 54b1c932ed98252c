// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate includes the geometry representations, path processing and paint model used by
//! [Imgshift CPU][imgshift_cpu] and the document parser in `imgshift_svg`.
//!
//! # Usage
//!
//! This crate should not be used on its own, and you should instead use `imgshift`, which
//! parses a document and dispatches it to a renderer.
//!
//! # Contents
//!
//! - [`transform`]: affine matrix helpers and the transform-list grammar.
//! - [`path`]: tokenizing path data into [`PathCommand`](path::PathCommand)s.
//! - [`flatten`]: flattening commands into polygons with a winding direction.
//! - [`stroke`]: expanding polylines into fillable stroke polygons.
//! - [`paint`]: solid colors and gradients that can be sampled at a point.
//! - [`pixmap`]: a straight-alpha RGBA8 buffer with source-over blending.
//!
//! [imgshift_cpu]: https://crates.io/crates/imgshift_cpu
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
    reason = "Colors are quantized from f32/f64 to u8 on purpose, and pixel coordinates are \
clamped to the buffer before they are cast."
)]

pub mod color;
pub mod flatten;
pub mod paint;
pub mod path;
pub mod pixmap;
pub mod stroke;
pub mod transform;

pub use peniko;
pub use peniko::kurbo;
