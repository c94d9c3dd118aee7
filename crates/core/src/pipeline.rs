//! Orchestration of a single compile call.

use crate::error::CompileError;
use crate::world::World;
use folio_resource::{ResolutionConfig, ResolutionContext};
use folio_traits::{EngineInput, TypesetEngine};
use std::path::PathBuf;
use std::time::Instant;

/// One compile call: the source bytes and the directories it may read from.
///
/// The request borrows the source; nothing in it outlives the call.
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    source: &'a [u8],
    resolution: ResolutionConfig,
}

impl<'a> CompileRequest<'a> {
    /// A request with local file and package resolution both disabled.
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            resolution: ResolutionConfig::disabled(),
        }
    }

    /// Allows local references, resolved against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.resolution.root = Some(root.into());
        self
    }

    /// Allows package references, looked up in `cache`.
    pub fn with_package_cache(mut self, cache: impl Into<PathBuf>) -> Self {
        self.resolution.package_cache = Some(cache.into());
        self
    }

    /// Replaces both directory settings at once.
    pub fn with_resolution(mut self, resolution: ResolutionConfig) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    pub fn resolution(&self) -> &ResolutionConfig {
        &self.resolution
    }
}

/// Compiles `request` against `world`.
///
/// Steps:
/// 1. Build a fresh resolution context from the request's directories.
/// 2. Decode the source as UTF-8 (an empty source is valid).
/// 3. Hand source, prepared fonts and context to the engine.
///
/// The world is only read. The context is dropped before this returns.
pub fn compile<E: TypesetEngine>(
    world: &World<E>,
    request: &CompileRequest<'_>,
) -> Result<Vec<u8>, CompileError> {
    let started = Instant::now();
    let context = ResolutionContext::new(request.resolution());

    let source = std::str::from_utf8(request.source()).inspect_err(|e| {
        log::warn!("Rejected source: {e}");
    })?;

    log::debug!(
        "Compiling {} bytes with {} (root: {:?}, package cache: {:?})",
        source.len(),
        world.engine().name(),
        context.root(),
        context.package_cache()
    );

    let input = EngineInput {
        source,
        fonts: world.prepared_fonts(),
        resolver: &context,
    };

    match world.engine().compile(input) {
        Ok(output) => {
            log::debug!(
                "Compiled {} bytes of output in {:?}",
                output.len(),
                started.elapsed()
            );
            Ok(output)
        }
        Err(err) => {
            log::warn!("Compilation failed: {err}");
            for diagnostic in err.diagnostics() {
                log::warn!("{diagnostic}");
            }
            Err(CompileError::Engine(err))
        }
    }
}
