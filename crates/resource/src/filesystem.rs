//! Filesystem-based resolution of local references.
//!
//! Paths are resolved relative to a root directory with measures to prevent
//! path traversal: every resolved path must stay inside the root after
//! symlinks and `..` components are resolved.

use folio_traits::{ResourceError, SharedResourceData};
use std::path::{Component, Path, PathBuf};

/// Resolves path-like references against a root directory.
///
/// The root is not required to exist when the resolver is created. A missing
/// or unreadable root is only discovered when a file is actually requested,
/// and is reported as a resolution error for that file.
#[derive(Debug, Clone)]
pub struct LocalRootResolver {
    root: PathBuf,
    /// Canonicalized root for security checks, computed once
    canonical_root: Option<PathBuf>,
}

impl LocalRootResolver {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        // May fail if the root doesn't exist; that surfaces on first access
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    /// Returns the root directory as given.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a reference to a canonical path inside the root.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf, ResourceError> {
        resolve_within(&self.root, self.canonical_root.as_deref(), path)
    }

    /// Reads a referenced file.
    pub fn load(&self, path: &Path) -> Result<SharedResourceData, ResourceError> {
        let resolved = self.resolve(path)?;
        read_file(&resolved, path)
    }
}

/// Strips root and prefix components so that `/a/b.typ` is read as `a/b.typ`.
pub(crate) fn rootless(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}

/// Joins `path` onto `base` and checks the result does not escape `canonical_base`.
pub(crate) fn resolve_within(
    base: &Path,
    canonical_base: Option<&Path>,
    path: &Path,
) -> Result<PathBuf, ResourceError> {
    let relative = rootless(path);
    if relative.as_os_str().is_empty() {
        return Err(ResourceError::InvalidPath(format!(
            "'{}' does not name a file",
            path.display()
        )));
    }

    let canonical_base =
        canonical_base.ok_or_else(|| ResourceError::NotFound(base.join(&relative)))?;

    let full = base.join(&relative);
    let canonical = full
        .canonicalize()
        .map_err(|e| ResourceError::from_io(path, &e))?;

    if !canonical.starts_with(canonical_base) {
        log::debug!(
            "Blocked '{}': resolves outside of '{}'",
            path.display(),
            canonical_base.display()
        );
        return Err(ResourceError::AccessDenied(path.to_path_buf()));
    }

    Ok(canonical)
}

pub(crate) fn read_file(resolved: &Path, requested: &Path) -> Result<SharedResourceData, ResourceError> {
    std::fs::read(resolved)
        .map(SharedResourceData::from)
        .map_err(|e| ResourceError::from_io(requested, &e))
}
