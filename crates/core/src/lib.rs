//! # folio-core
//!
//! The lifecycle of a compiler world and the contract of a single compile.
//!
//! - **world**: [`World`] owns an engine and the merged [`FontRegistry`]
//! - **pipeline**: [`CompileRequest`] and the orchestration of one compile
//! - **error**: Error types for construction and compilation
//!
//! ## Design Principle
//!
//! This crate knows nothing about any concrete markup language or output
//! format. The engine is reached only through [`TypesetEngine`]; files are
//! reached only through the resolution context built for each call.

// Re-export foundation crates
pub use folio_resource as resource;
pub use folio_traits as traits;

pub mod error;
pub mod pipeline;
pub mod world;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{CompileError, WorldError};
pub use pipeline::CompileRequest;
pub use world::{World, WorldBuilder};

// Re-export the types callers need alongside a world
pub use resource::{ResolutionConfig, ResolutionContext};
pub use traits::{
    Diagnostic, EngineError, FontData, FontEntry, FontOrigin, FontRegistry, Severity,
    TypesetEngine,
};
