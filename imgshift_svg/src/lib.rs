// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document model of Imgshift.
//!
//! This crate turns SVG markup into a [`Document`]: a tree of [`Element`]s, each with a fully
//! composed transform and a resolved [`Style`], plus a table of gradient definitions that paint
//! references are resolved against at render time.
//!
//! Parsing is tolerant. Malformed XML is an error, but malformed attribute values fall back to
//! defaults, unknown elements are skipped while their children are still visited, and an
//! unresolvable paint reference becomes a neutral gray.
//!
//! # Example
//!
//! ```
//! use imgshift_svg::{Document, ElementKind};
//!
//! let doc = Document::parse(
//!     r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
//!         <rect width="20" height="10" fill="red"/>
//!     </svg>"#,
//! )
//! .unwrap();
//! assert_eq!(doc.output_size(None, None), (20, 10));
//! assert!(matches!(doc.elements[0].kind, ElementKind::Rect { .. }));
//! ```
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

mod document;
mod element;
mod error;
mod parse;
mod style;
pub mod units;

pub use document::{load_source, Document, GradientDef};
pub use element::{Element, ElementKind, TextSpan};
pub use error::Error;
pub use style::{PaintRef, Style};

pub use imgshift_common;
