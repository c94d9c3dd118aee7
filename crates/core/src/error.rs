//! Error types for world construction and compilation.

use folio_traits::{Diagnostic, EngineError};
use std::path::PathBuf;
use thiserror::Error;

/// Failure while assembling a world.
#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Failed to read font file '{}': {source}", .path.display())]
    FontFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to scan font directory '{}': {source}", .path.display())]
    FontDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single compile call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Source is not valid UTF-8: {0}")]
    InvalidSource(#[from] std::str::Utf8Error),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

impl CompileError {
    /// Engine messages attached to this failure, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CompileError::InvalidSource(_) => &[],
            CompileError::Engine(err) => err.diagnostics(),
        }
    }
}
