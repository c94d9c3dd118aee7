use folio_core::{CompileError, WorldError};
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the `folio` command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read '{}': {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
