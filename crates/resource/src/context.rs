// crates/resource/src/context.rs
//! The per-compile resolution policy.

use crate::filesystem::LocalRootResolver;
use crate::package::PackageCacheResolver;
use folio_traits::{FileRef, FileResolver, ResourceError, SharedResourceData};
use std::path::{Path, PathBuf};

/// Which directories a compilation may read from.
///
/// Both are independently optional. `None` disables that kind of reference
/// entirely; there is no "empty but present" state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Root for local file references.
    pub root: Option<PathBuf>,
    /// Directory holding unpacked packages.
    pub package_cache: Option<PathBuf>,
}

impl ResolutionConfig {
    /// No local files, no packages.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_package_cache(mut self, cache: impl Into<PathBuf>) -> Self {
        self.package_cache = Some(cache.into());
        self
    }
}

/// Routes each reference to exactly one resolver, by kind.
///
/// Built fresh for every compile call and dropped when it returns.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    local: Option<LocalRootResolver>,
    packages: Option<PackageCacheResolver>,
}

impl ResolutionContext {
    /// Builds the context without touching the directories beyond
    /// canonicalizing the root.
    pub fn new(config: &ResolutionConfig) -> Self {
        Self {
            local: config.root.as_deref().map(LocalRootResolver::new),
            packages: config.package_cache.as_deref().map(PackageCacheResolver::new),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.local.as_ref().map(LocalRootResolver::root)
    }

    pub fn package_cache(&self) -> Option<&Path> {
        self.packages.as_ref().map(PackageCacheResolver::cache_dir)
    }
}

impl FileResolver for ResolutionContext {
    fn load(&self, file: FileRef<'_>) -> Result<SharedResourceData, ResourceError> {
        log::debug!("Resolving {file}");
        match file {
            FileRef::Local(path) => match &self.local {
                Some(local) => local.load(path),
                None => Err(ResourceError::LocalDisabled(path.to_path_buf())),
            },
            FileRef::Package { spec, path } => match &self.packages {
                Some(packages) => packages.load(spec, path),
                None => Err(ResourceError::PackageDisabled(spec.clone())),
            },
        }
    }

    fn name(&self) -> &'static str {
        "ResolutionContext"
    }
}
