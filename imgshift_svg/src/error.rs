// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors that can occur while loading a document.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The markup is not well-formed XML.
    #[error("malformed markup: {0}")]
    Xml(#[from] roxmltree::Error),
    /// The document could not be read from disk.
    #[error("couldn't read document")]
    Io(#[from] std::io::Error),
    /// The root element is not `<svg>`.
    #[error("root element is <{0}>, not <svg>")]
    NotSvg(String),
}
