//! Error types for archup operations.
//!
//! This module provides the main error type [`ArchupError`] which wraps the
//! failures that can occur while loading a workspace and generating its
//! document.

use std::io;

use thiserror::Error;

use archup_parser::error::ParseError;

use crate::include::IncludeError;

/// The main error type for archup operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the document source next to the diagnostics so
/// that spans can be rendered as annotated snippets.
#[derive(Debug, Error)]
pub enum ArchupError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error(transparent)]
    Include(#[from] IncludeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ArchupError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
