//! The ordered font collection attached to a world.

use std::fmt;

/// Raw font file bytes (TTF/OTF/TTC). Cheap to clone.
pub type FontData = bytes::Bytes;

/// Where a registry entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontOrigin {
    /// Shipped with the engine.
    Builtin,
    /// Supplied by the caller when the world was constructed.
    Custom,
}

/// One font file in a [`FontRegistry`].
#[derive(Clone, PartialEq, Eq)]
pub struct FontEntry {
    origin: FontOrigin,
    data: FontData,
}

impl FontEntry {
    pub fn origin(&self) -> FontOrigin {
        self.origin
    }

    pub fn data(&self) -> &FontData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for FontEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontEntry")
            .field("origin", &self.origin)
            .field("len", &self.data.len())
            .finish()
    }
}

/// An immutable, ordered collection of font files: builtins first, then
/// custom fonts in the order they were supplied.
///
/// Font bytes are not validated here. Duplicates and unparsable data are kept
/// as-is; the engine decides what to do with them when it prepares its fonts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontRegistry {
    entries: Vec<FontEntry>,
    builtin_count: usize,
}

impl FontRegistry {
    /// Merge `builtin` and `custom` into one registry.
    ///
    /// Each `FontData` is an owned handle, so the registry never depends on
    /// caller buffers outliving this call.
    pub fn build<B, C>(builtin: B, custom: C) -> Self
    where
        B: IntoIterator<Item = FontData>,
        C: IntoIterator<Item = FontData>,
    {
        let mut entries: Vec<FontEntry> = builtin
            .into_iter()
            .map(|data| FontEntry {
                origin: FontOrigin::Builtin,
                data,
            })
            .collect();
        let builtin_count = entries.len();

        entries.extend(custom.into_iter().map(|data| FontEntry {
            origin: FontOrigin::Custom,
            data,
        }));

        Self {
            entries,
            builtin_count,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FontEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FontEntry> {
        self.entries.iter()
    }

    pub fn builtin_count(&self) -> usize {
        self.builtin_count
    }

    pub fn builtin(&self) -> &[FontEntry] {
        &self.entries[..self.builtin_count]
    }

    pub fn custom(&self) -> &[FontEntry] {
        &self.entries[self.builtin_count..]
    }

    /// Total number of font bytes held.
    pub fn total_bytes(&self) -> usize {
        self.entries.iter().map(FontEntry::len).sum()
    }
}

impl<'a> IntoIterator for &'a FontRegistry {
    type Item = &'a FontEntry;
    type IntoIter = std::slice::Iter<'a, FontEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
