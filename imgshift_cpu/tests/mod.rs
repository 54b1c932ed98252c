// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the test harness for `imgshift_cpu`.
//! - The `util` module contains shared helpers for building render contexts, rendering small
//!   documents and inspecting pixels.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that every module can share `util`.
//! - New tests go into the module of their topic (fill rules, gradients, opacity, strokes,
//!   documents), or into `basic.rs` if none fits.
//! - Expected colors are exact RGBA values, worked out from the blending rules rather than
//!   compared against reference images.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod document;
mod gradient;
mod opacity;
mod util;
