//! Errors raised at the C boundary.
//!
//! None of these cross the boundary as values: every variant collapses to
//! `error = 1` in a [`crate::FolioResult`]. They exist so the failure can be
//! logged with its cause before it is flattened.

use folio_core::CompileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FfiError {
    #[error("World handle is null")]
    NullWorld,

    #[error("Source pointer is null but length is {0}")]
    NullSource(usize),

    #[error("{kind} directory is not valid UTF-8")]
    InvalidPath { kind: &'static str },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Engine panicked: {0}")]
    Panicked(String),
}

impl FfiError {
    /// Builds a [`FfiError::Panicked`] from a payload caught by `catch_unwind`.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        FfiError::Panicked(message)
    }
}
