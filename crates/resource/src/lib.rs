//! File resolution for a single compilation.
//!
//! This crate provides the filesystem-backed implementation of the
//! `FileResolver` trait from folio-traits.
//!
//! ## Resolvers
//!
//! - [`LocalRootResolver`]: path-like references, relative to a root directory
//! - [`PackageCacheResolver`]: package references, looked up in a cache laid
//!   out as `{cache}/{namespace}/{name}/{version}/`
//! - [`ResolutionContext`]: routes each reference to exactly one of the above
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory resolver from folio-traits:
//! - [`InMemoryResolver`]: Pre-populated in-memory storage

mod context;
mod filesystem;
mod package;

pub use context::{ResolutionConfig, ResolutionContext};
pub use filesystem::LocalRootResolver;
pub use package::PackageCacheResolver;

// Re-export the in-memory resolver from folio-traits for convenience
pub use folio_traits::InMemoryResolver;
