use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project directory with a couple of includable files
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create project dir");
        fs::write(dir.path().join("chapter.typ"), "= Chapter\n\nFrom the project.").unwrap();
        fs::create_dir(dir.path().join("parts")).unwrap();
        fs::write(
            dir.path().join("parts").join("two-pages.typ"),
            "First\n#pagebreak()\nSecond",
        )
        .unwrap();
        fs::write(dir.path().join("data.csv"), "name,amount\nalpha,1\nbeta,2\n").unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// A package cache holding `@preview/{name}:{version}`
pub struct PackageCache {
    pub dir: TempDir,
}

impl PackageCache {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create cache dir");
        Self { dir }
    }

    /// Writes a package whose `title` function renders its argument over two pages.
    pub fn with_package(self, name: &str, version: &str) -> Self {
        let root = self.package_dir(name, version);
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join("typst.toml"),
            format!("[package]\nname = \"{name}\"\nversion = \"{version}\"\nentrypoint = \"lib.typ\"\n"),
        )
        .unwrap();
        fs::write(
            root.join("lib.typ"),
            "#let title(body) = [#heading(body) #pagebreak() Continued]",
        )
        .unwrap();
        self
    }

    pub fn package_dir(&self, name: &str, version: &str) -> PathBuf {
        self.dir.path().join("preview").join(name).join(version)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Source importing the package written by [`PackageCache::with_package`]
pub fn package_source(name: &str, version: &str) -> String {
    format!("#import \"@preview/{name}:{version}\": title\n#title[Imported]")
}
