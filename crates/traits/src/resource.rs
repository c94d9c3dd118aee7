//! FileResolver trait for abstracting access to files referenced by source.
//!
//! The engine never touches the filesystem directly. Every import, include or
//! binary asset a document asks for is classified into a [`FileRef`] and handed
//! to a resolver, which decides whether and where it can be read from.

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for file resolution operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("local file resolution is disabled (no root directory): {}", .0.display())]
    LocalDisabled(PathBuf),

    #[error("package resolution is disabled (no package cache directory): {0}")]
    PackageDisabled(PackageSpec),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Access denied: {}", .0.display())]
    AccessDenied(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to read '{}': {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl ResourceError {
    /// Maps an I/O failure on `path` onto the closest resolution error.
    pub fn from_io(path: &Path, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ResourceError::AccessDenied(path.to_path_buf()),
            _ => ResourceError::Io {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        }
    }
}

/// Shared file contents (reference-counted, cheap to clone).
pub type SharedResourceData = bytes::Bytes;

/// Identifies an external package: `@namespace/name:version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSpec {
    pub namespace: String,
    pub name: String,
    pub version: String,
}

impl PackageSpec {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Directory of this package relative to a cache root: `{namespace}/{name}/{version}`.
    pub fn relative_dir(&self) -> PathBuf {
        Path::new(&self.namespace)
            .join(&self.name)
            .join(&self.version)
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}/{}:{}", self.namespace, self.name, self.version)
    }
}

/// A reference made by source, already classified by its syntax.
///
/// Local and package references live in separate namespaces: a resolver must
/// route each kind to its own backing store and never fall back to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRef<'a> {
    /// A path-like reference, relative to the project root.
    Local(&'a Path),
    /// A file inside an external package.
    Package { spec: &'a PackageSpec, path: &'a Path },
}

impl<'a> FileRef<'a> {
    /// The path of the file within its namespace.
    pub fn path(&self) -> &'a Path {
        match self {
            FileRef::Local(path) => path,
            FileRef::Package { path, .. } => path,
        }
    }
}

impl fmt::Display for FileRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRef::Local(path) => write!(f, "{}", path.display()),
            FileRef::Package { spec, path } => write!(f, "{spec}/{}", path.display()),
        }
    }
}

/// A trait for loading the files a document refers to.
///
/// # Implementations
///
/// - `ResolutionContext` (folio-resource): local root + package cache on disk
/// - [`InMemoryResolver`]: pre-populated in-memory storage
pub trait FileResolver: Send + Sync + Debug {
    /// Load the full contents of a referenced file.
    fn load(&self, file: FileRef<'_>) -> Result<SharedResourceData, ResourceError>;

    /// Returns a human-readable name for this resolver (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory resolver.
///
/// Files are keyed by their namespace and path and must be inserted before
/// use. Works without any filesystem access.
#[derive(Debug, Default, Clone)]
pub struct InMemoryResolver {
    local: HashMap<PathBuf, SharedResourceData>,
    packages: HashMap<(PackageSpec, PathBuf), SharedResourceData>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a local file. Leading `/` is ignored so `/a.typ` and `a.typ` are the same key.
    pub fn insert_local(&mut self, path: impl AsRef<Path>, data: impl Into<SharedResourceData>) {
        self.local.insert(key(path.as_ref()), data.into());
    }

    /// Add a file belonging to a package.
    pub fn insert_package_file(
        &mut self,
        spec: PackageSpec,
        path: impl AsRef<Path>,
        data: impl Into<SharedResourceData>,
    ) {
        self.packages
            .insert((spec, key(path.as_ref())), data.into());
    }

    /// Builder-style variant of [`Self::insert_local`].
    pub fn with_local(mut self, path: impl AsRef<Path>, data: impl Into<SharedResourceData>) -> Self {
        self.insert_local(path, data);
        self
    }

    /// Builder-style variant of [`Self::insert_package_file`].
    pub fn with_package_file(
        mut self,
        spec: PackageSpec,
        path: impl AsRef<Path>,
        data: impl Into<SharedResourceData>,
    ) -> Self {
        self.insert_package_file(spec, path, data);
        self
    }

    /// Number of stored files across both namespaces.
    pub fn len(&self) -> usize {
        self.local.len() + self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn key(path: &Path) -> PathBuf {
    path.strip_prefix("/").unwrap_or(path).to_path_buf()
}

impl FileResolver for InMemoryResolver {
    fn load(&self, file: FileRef<'_>) -> Result<SharedResourceData, ResourceError> {
        let found = match file {
            FileRef::Local(path) => self.local.get(&key(path)),
            FileRef::Package { spec, path } => self.packages.get(&(spec.clone(), key(path))),
        };
        found
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(file.path().to_path_buf()))
    }

    fn name(&self) -> &'static str {
        "InMemoryResolver"
    }
}
