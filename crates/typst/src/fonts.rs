//! Font registry to Typst faces.

use folio_traits::{FontData, FontOrigin, FontRegistry};
use typst::foundations::Bytes;
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;

/// The fonts bundled with Typst (Libertinus Serif, New Computer Modern,
/// DejaVu Sans Mono and friends).
pub fn builtin() -> Vec<FontData> {
    typst_assets::fonts().map(FontData::from_static).collect()
}

/// Every face found in a registry, indexed the same way as the book.
pub struct TypstFonts {
    book: LazyHash<FontBook>,
    faces: Vec<Font>,
}

impl TypstFonts {
    /// Parses every face of every registry entry, in registry order.
    ///
    /// Collections contribute all their faces. Entries that contain no
    /// readable face are skipped with a warning.
    pub fn load(registry: &FontRegistry) -> Self {
        // Bundled fonts yield ~20 faces, a custom file usually 1-4
        let mut faces = Vec::with_capacity(registry.builtin_count() * 2 + registry.custom().len() * 4);

        for (position, entry) in registry.iter().enumerate() {
            let bytes = Bytes::new(entry.data().clone());
            let before = faces.len();
            for index in 0.. {
                match Font::new(bytes.clone(), index) {
                    Some(font) => faces.push(font),
                    None => break,
                }
            }
            if faces.len() == before {
                let origin = match entry.origin() {
                    FontOrigin::Builtin => "builtin",
                    FontOrigin::Custom => "custom",
                };
                log::warn!(
                    "Skipping {origin} font #{position} ({} bytes): no readable face",
                    entry.len()
                );
            }
        }

        let book = FontBook::from_fonts(faces.iter());
        log::debug!("Loaded {} font faces from {} files", faces.len(), registry.len());

        Self {
            book: LazyHash::new(book),
            faces,
        }
    }

    pub(crate) fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    pub(crate) fn face(&self, index: usize) -> Option<Font> {
        self.faces.get(index).cloned()
    }

    /// Number of faces available to documents.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Family names of all faces, deduplicated, in first-seen order.
    pub fn families(&self) -> Vec<String> {
        let mut families: Vec<String> = Vec::new();
        for face in &self.faces {
            let family = &face.info().family;
            if !families.iter().any(|known| known == family) {
                families.push(family.clone());
            }
        }
        families
    }
}
