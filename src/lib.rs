//! # folio
//!
//! Long-lived document compiler worlds. A [`World`] is built once with its
//! fonts and then compiles any number of sources, each against its own
//! optional root directory and package cache.
//!
//! The workspace is split like this:
//!
//! - `folio-traits`: the engine, font and file-resolution abstractions
//! - `folio-resource`: per-compile file resolution on disk
//! - `folio-core`: the world lifecycle and the compile pipeline
//! - `folio-typst`: the Typst engine producing PDF
//! - `folio-ffi`: the C boundary
//!
//! This crate re-exports the Rust API and hosts the `folio` command.
//!
//! ```ignore
//! use folio::{CompileRequest, TypstEngine, World};
//!
//! let world = World::builder(TypstEngine::new())
//!     .with_font_file("fonts/Inter.ttf")?
//!     .build();
//! let pdf = world.compile(&CompileRequest::new(b"= Report").with_root("docs"))?;
//! ```

pub mod error;
pub mod report;

pub use error::CliError;

pub use folio_core::{
    CompileError, CompileRequest, Diagnostic, EngineError, FontData, FontEntry, FontOrigin,
    FontRegistry, ResolutionConfig, Severity, TypesetEngine, World, WorldBuilder, WorldError,
};
pub use folio_typst::{TypstConfig, TypstEngine, TypstFonts};
