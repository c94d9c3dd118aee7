//! Package cache lookup.
//!
//! Packages are expected to be unpacked already under
//! `{cache}/{namespace}/{name}/{version}/`. Nothing is downloaded here.

use crate::filesystem::{read_file, resolve_within};
use folio_traits::{PackageSpec, ResourceError, SharedResourceData};
use std::path::{Path, PathBuf};

/// Resolves files inside packages from an on-disk package cache.
#[derive(Debug, Clone)]
pub struct PackageCacheResolver {
    cache: PathBuf,
}

impl PackageCacheResolver {
    pub fn new<P: AsRef<Path>>(cache: P) -> Self {
        Self {
            cache: cache.as_ref().to_path_buf(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache
    }

    /// Directory a package is expected in, whether or not it exists.
    pub fn package_dir(&self, spec: &PackageSpec) -> PathBuf {
        self.cache.join(spec.relative_dir())
    }

    /// Resolves a file of `spec` to a canonical path inside the package directory.
    pub fn resolve(&self, spec: &PackageSpec, path: &Path) -> Result<PathBuf, ResourceError> {
        let base = self.package_dir(spec);
        let canonical_base = base.canonicalize().ok();
        if canonical_base.is_none() {
            log::debug!("Package {spec} is not in the cache at '{}'", base.display());
        }
        resolve_within(&base, canonical_base.as_deref(), path)
    }

    /// Reads a file of `spec`.
    pub fn load(&self, spec: &PackageSpec, path: &Path) -> Result<SharedResourceData, ResourceError> {
        let resolved = self.resolve(spec, path)?;
        read_file(&resolved, path)
    }
}
