//! TypesetEngine trait: the single seam between the world lifecycle and
//! whatever parses, lays out and renders documents.

use crate::font::{FontData, FontRegistry};
use crate::resource::FileResolver;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Severity of an engine message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A message produced by the engine while compiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            hints: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{label}: {}", self.message)?;
        for hint in &self.hints {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count()
}

/// Errors reported by an engine for a single compilation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("compilation failed with {} error(s)", error_count(.diagnostics))]
    Compile { diagnostics: Vec<Diagnostic> },

    #[error("document export failed with {} error(s)", error_count(.diagnostics))]
    Export { diagnostics: Vec<Diagnostic> },

    #[error("engine fault: {0}")]
    Internal(String),
}

impl EngineError {
    /// All messages attached to this failure, warnings included.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            EngineError::Compile { diagnostics } | EngineError::Export { diagnostics } => {
                diagnostics.as_slice()
            }
            EngineError::Internal(_) => &[],
        }
    }
}

/// Everything an engine sees for one compilation.
///
/// Borrowed for the duration of the call only; engines must not keep any of
/// it once `compile` returns.
pub struct EngineInput<'a, F> {
    /// The main document text.
    pub source: &'a str,
    /// The engine's prepared form of the world's font registry.
    pub fonts: &'a F,
    /// Policy for every file the document refers to.
    pub resolver: &'a dyn FileResolver,
}

impl<F> fmt::Debug for EngineInput<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineInput")
            .field("source_len", &self.source.len())
            .field("resolver", &self.resolver.name())
            .finish()
    }
}

/// A document compiler the world delegates to.
///
/// Implementations must be reentrant: one engine value serves every compile
/// issued against its world, possibly from several threads at once.
pub trait TypesetEngine: Send + Sync {
    /// Engine-specific font state derived once from the registry.
    type Fonts: Send + Sync;

    /// Returns a human-readable name for this engine (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Fonts that every world built on this engine starts with.
    fn builtin_fonts(&self) -> Vec<FontData>;

    /// Parse or index the registry. Called exactly once per world.
    fn prepare_fonts(&self, registry: &FontRegistry) -> Self::Fonts;

    /// Compile one document into output bytes.
    fn compile(&self, input: EngineInput<'_, Self::Fonts>) -> Result<Vec<u8>, EngineError>;
}
