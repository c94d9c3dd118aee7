//! Typst as a folio engine.
//!
//! [`TypstEngine`] implements `TypesetEngine` on top of the `typst` compiler
//! and `typst-pdf` exporter. The fonts bundled in `typst-assets` are its
//! builtin set.
//!
//! # Module Structure
//!
//! - [`config`] - Engine settings (main file path, tagged PDF, fixed date)
//! - [`fonts`] - Parsing a font registry into Typst faces and a font book
//! - `world` - The per-call `typst::World` over a resolver
//! - `diagnostics` - Converting Typst messages into folio diagnostics
//!
//! # Example
//!
//! ```ignore
//! use folio_core::{CompileRequest, World};
//! use folio_typst::TypstEngine;
//!
//! let world = World::new(TypstEngine::new());
//! let pdf = world.compile(&CompileRequest::new(b"= Hello"))?;
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```

pub mod config;
mod diagnostics;
pub mod fonts;
mod world;

pub use config::TypstConfig;
pub use fonts::TypstFonts;

use folio_traits::{EngineError, EngineInput, FontData, FontRegistry, TypesetEngine};
use std::fmt;
use typst::diag::Warned;
use typst::layout::PagedDocument;
use typst::syntax::{FileId, VirtualPath};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt};
use typst_pdf::PdfOptions;

/// A Typst compiler configured once and shared by every compile of a world.
pub struct TypstEngine {
    config: TypstConfig,
    library: LazyHash<Library>,
    main: FileId,
}

impl Default for TypstEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TypstEngine {
    pub fn new() -> Self {
        Self::with_config(TypstConfig::default())
    }

    pub fn with_config(config: TypstConfig) -> Self {
        let main = FileId::new(None, VirtualPath::new(&config.main_path));
        Self {
            config,
            library: LazyHash::new(Library::default()),
            main,
        }
    }

    pub fn config(&self) -> &TypstConfig {
        &self.config
    }

    fn compile_pdf(&self, input: &EngineInput<'_, TypstFonts>) -> Result<Vec<u8>, EngineError> {
        let world = world::CompileWorld::new(self, input);
        let Warned { output, warnings } = typst::compile::<PagedDocument>(&world);

        let document = match output {
            Ok(document) => document,
            Err(errors) => {
                return Err(EngineError::Compile {
                    diagnostics: diagnostics::collect(&errors, &warnings),
                });
            }
        };

        for warning in &warnings {
            log::warn!("typst: {}", warning.message);
        }

        let options = PdfOptions {
            tagged: self.config.tagged_pdf,
            ..PdfOptions::default()
        };
        typst_pdf::pdf(&document, &options).map_err(|errors| EngineError::Export {
            diagnostics: diagnostics::collect(&errors, &warnings),
        })
    }
}

impl fmt::Debug for TypstEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypstEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TypesetEngine for TypstEngine {
    type Fonts = TypstFonts;

    fn name(&self) -> &'static str {
        "typst"
    }

    fn builtin_fonts(&self) -> Vec<FontData> {
        fonts::builtin()
    }

    fn prepare_fonts(&self, registry: &FontRegistry) -> TypstFonts {
        TypstFonts::load(registry)
    }

    fn compile(&self, input: EngineInput<'_, TypstFonts>) -> Result<Vec<u8>, EngineError> {
        let result = self.compile_pdf(&input);
        comemo::evict(self.config.cache_max_age);
        result
    }
}
