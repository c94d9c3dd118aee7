// crates/typst/src/world.rs
//! The per-call `typst::World`.
//!
//! Built fresh for every compile from the engine's shared state (library,
//! prepared fonts) and the call's own source and resolver. Nothing here
//! outlives the call.

use crate::TypstEngine;
use crate::fonts::TypstFonts;
use chrono::{Datelike, Local, NaiveDate, TimeDelta, Utc};
use folio_traits::{EngineInput, FileRef, FileResolver, PackageSpec, ResourceError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, World};

pub(crate) struct CompileWorld<'a> {
    library: &'a LazyHash<Library>,
    fonts: &'a TypstFonts,
    resolver: &'a dyn FileResolver,
    main: Source,
    today: Option<NaiveDate>,
    /// Files already read during this call, so repeated lookups hit the
    /// resolver once.
    files: Mutex<HashMap<FileId, FileResult<Bytes>>>,
}

impl<'a> CompileWorld<'a> {
    pub(crate) fn new(engine: &'a TypstEngine, input: &EngineInput<'a, TypstFonts>) -> Self {
        Self {
            library: &engine.library,
            fonts: input.fonts,
            resolver: input.resolver,
            main: Source::new(engine.main, input.source.to_owned()),
            today: engine.config.today,
            files: Mutex::new(HashMap::new()),
        }
    }

    fn read(&self, id: FileId) -> FileResult<Bytes> {
        if let Some(cached) = self.files.lock().ok().and_then(|files| files.get(&id).cloned()) {
            return cached;
        }

        let result = load(self.resolver, id);
        if let Ok(mut files) = self.files.lock() {
            files.insert(id, result.clone());
        }
        result
    }
}

/// Classifies `id` and asks the resolver for it.
fn load(resolver: &dyn FileResolver, id: FileId) -> FileResult<Bytes> {
    let path = id.vpath().as_rootless_path();
    let result = match id.package() {
        Some(package) => {
            let spec = PackageSpec::new(
                package.namespace.as_str(),
                package.name.as_str(),
                package.version.to_string(),
            );
            resolver.load(FileRef::Package { spec: &spec, path })
        }
        None => resolver.load(FileRef::Local(path)),
    };

    match result {
        Ok(data) => Ok(Bytes::new(data)),
        Err(err) => {
            log::debug!("Could not load {:?}: {err}", id.vpath());
            Err(file_error(err, path))
        }
    }
}

fn file_error(err: ResourceError, requested: &Path) -> FileError {
    match err {
        ResourceError::NotFound(_) | ResourceError::InvalidPath(_) => {
            FileError::NotFound(requested.to_path_buf())
        }
        ResourceError::AccessDenied(_) => FileError::AccessDenied,
        other => FileError::Other(Some(other.to_string().into())),
    }
}

fn decode(bytes: &Bytes) -> FileResult<String> {
    let text = std::str::from_utf8(bytes).map_err(|_| FileError::InvalidUtf8)?;
    // Strip a UTF-8 BOM
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_owned())
}

fn to_datetime(date: NaiveDate) -> Option<Datetime> {
    Datetime::from_ymd(
        date.year(),
        u8::try_from(date.month()).ok()?,
        u8::try_from(date.day()).ok()?,
    )
}

impl World for CompileWorld<'_> {
    fn library(&self) -> &LazyHash<Library> {
        self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        self.fonts.book()
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            return Ok(self.main.clone());
        }
        let bytes = self.read(id)?;
        Ok(Source::new(id, decode(&bytes)?))
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        if id == self.main.id() {
            return Ok(Bytes::new(self.main.text().as_bytes().to_vec()));
        }
        self.read(id)
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.face(index)
    }

    fn today(&self, offset: Option<i64>) -> Option<Datetime> {
        let date = match (self.today, offset) {
            (Some(fixed), _) => fixed,
            (None, None) => Local::now().date_naive(),
            (None, Some(hours)) => Utc::now()
                .checked_add_signed(TimeDelta::try_hours(hours)?)?
                .date_naive(),
        };
        to_datetime(date)
    }
}
