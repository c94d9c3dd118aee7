// crates/core/src/world.rs
//! The long-lived compiler instance.

use crate::error::{CompileError, WorldError};
use crate::pipeline::{self, CompileRequest};
use folio_traits::{FontData, FontRegistry, TypesetEngine};
use std::fmt;
use std::fs;
use std::path::Path;

/// Extensions recognised by [`WorldBuilder::with_font_dir`].
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc"];

/// A compiler instance: an engine plus the fonts it was built with.
///
/// Immutable once built. Every compile borrows it read-only, so a world can be
/// shared between threads and compiled against concurrently.
pub struct World<E: TypesetEngine> {
    engine: E,
    registry: FontRegistry,
    fonts: E::Fonts,
}

impl<E: TypesetEngine> World<E> {
    /// Creates a world with the engine's builtin fonts only.
    pub fn new(engine: E) -> Self {
        Self::builder(engine).build()
    }

    /// Starts a builder for a world with custom fonts.
    pub fn builder(engine: E) -> WorldBuilder<E> {
        WorldBuilder::new(engine)
    }

    /// The merged font registry: builtins first, then custom fonts.
    pub fn fonts(&self) -> &FontRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine's prepared form of [`World::fonts`], built once by
    /// [`WorldBuilder::build`].
    pub fn prepared_fonts(&self) -> &E::Fonts {
        &self.fonts
    }

    /// Compiles one document. See [`pipeline::compile`].
    pub fn compile(&self, request: &CompileRequest<'_>) -> Result<Vec<u8>, CompileError> {
        pipeline::compile(self, request)
    }
}

impl<E: TypesetEngine> fmt::Debug for World<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("engine", &self.engine.name())
            .field("builtin_fonts", &self.registry.builtin_count())
            .field("custom_fonts", &self.registry.custom().len())
            .finish()
    }
}

/// A builder for creating a [`World`].
pub struct WorldBuilder<E: TypesetEngine> {
    engine: E,
    custom_fonts: Vec<FontData>,
}

impl<E: TypesetEngine> WorldBuilder<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            custom_fonts: Vec::new(),
        }
    }

    /// Adds one custom font file. Fonts keep the order they are added in.
    pub fn with_font(mut self, data: impl Into<FontData>) -> Self {
        self.custom_fonts.push(data.into());
        self
    }

    /// Adds several custom font files, in iteration order.
    pub fn with_fonts<I, D>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<FontData>,
    {
        self.custom_fonts.extend(fonts.into_iter().map(Into::into));
        self
    }

    /// Reads a font file from disk and adds it.
    pub fn with_font_file<P: AsRef<Path>>(self, path: P) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| WorldError::FontFile {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded font file '{}' ({} bytes)", path.display(), data.len());
        Ok(self.with_font(data))
    }

    /// Adds every font file (`.ttf`, `.otf`, `.ttc`, `.otc`) directly inside a
    /// directory, sorted by file name so the registry order is stable.
    pub fn with_font_dir<P: AsRef<Path>>(mut self, path: P) -> Result<Self, WorldError> {
        let dir = path.as_ref();
        let dir_error = |source| WorldError::FontDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(dir_error)? {
            let file = entry.map_err(dir_error)?.path();
            let is_font = file
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if is_font && file.is_file() {
                files.push(file);
            }
        }
        files.sort();

        for file in files {
            self = self.with_font_file(file)?;
        }
        Ok(self)
    }

    /// Merges the fonts and lets the engine prepare them. Runs once per world.
    pub fn build(self) -> World<E> {
        let registry = FontRegistry::build(self.engine.builtin_fonts(), self.custom_fonts);
        let fonts = self.engine.prepare_fonts(&registry);

        log::info!(
            "{} world ready: {} builtin + {} custom font files",
            self.engine.name(),
            registry.builtin_count(),
            registry.custom().len()
        );

        World {
            engine: self.engine,
            registry,
            fonts,
        }
    }
}
