//! A deterministic fake engine for exercising worlds without a real typesetter.
//!
//! [`ScriptedEngine`] reads the source line by line:
//!
//! - `#include "path"` loads a local file and appends its contents
//! - `#import "@namespace/name:version[/path]"` loads a package file
//!   (`lib.typ` when no path is given) and appends its contents
//! - `#fail message` fails the compile with `message`
//! - `#panic` panics inside the engine
//! - any other line is copied to the output
//!
//! Output starts with `%SCRIPTED` followed by the number of prepared fonts.

use folio_traits::{
    Diagnostic, EngineError, EngineInput, FileRef, FontData, FontRegistry, PackageSpec,
    TypesetEngine,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fake engine driven by directives in the source text.
#[derive(Debug)]
pub struct ScriptedEngine {
    builtin: Vec<FontData>,
    prepare_calls: AtomicUsize,
    compile_calls: AtomicUsize,
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedEngine {
    /// An engine with two small builtin "fonts".
    pub fn new() -> Self {
        Self::with_builtin(vec![
            FontData::from_static(b"builtin-serif"),
            FontData::from_static(b"builtin-mono"),
        ])
    }

    pub fn with_builtin(builtin: Vec<FontData>) -> Self {
        Self {
            builtin,
            prepare_calls: AtomicUsize::new(0),
            compile_calls: AtomicUsize::new(0),
        }
    }

    /// How many times `prepare_fonts` ran.
    pub fn prepare_calls(&self) -> usize {
        self.prepare_calls.load(Ordering::SeqCst)
    }

    /// How many times `compile` ran.
    pub fn compile_calls(&self) -> usize {
        self.compile_calls.load(Ordering::SeqCst)
    }
}

fn failure(message: impl Into<String>) -> EngineError {
    EngineError::Compile {
        diagnostics: vec![Diagnostic::error(message)],
    }
}

/// Returns the quoted argument of `directive` on `line`, if present.
fn directive<'l>(line: &'l str, directive: &str) -> Option<&'l str> {
    let rest = line.strip_prefix(directive)?.trim();
    Some(rest.trim_matches('"'))
}

/// Parses `@namespace/name:version[/path]`.
fn parse_package(reference: &str) -> Option<(PackageSpec, PathBuf)> {
    let rest = reference.strip_prefix('@')?;
    let (namespace, rest) = rest.split_once('/')?;
    let (name, rest) = rest.split_once(':')?;
    let (version, path) = rest.split_once('/').unwrap_or((rest, "lib.typ"));
    if namespace.is_empty() || name.is_empty() || version.is_empty() {
        return None;
    }
    Some((PackageSpec::new(namespace, name, version), PathBuf::from(path)))
}

impl TypesetEngine for ScriptedEngine {
    type Fonts = Vec<FontData>;

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn builtin_fonts(&self) -> Vec<FontData> {
        self.builtin.clone()
    }

    fn prepare_fonts(&self, registry: &FontRegistry) -> Self::Fonts {
        self.prepare_calls.fetch_add(1, Ordering::SeqCst);
        registry.iter().map(|entry| entry.data().clone()).collect()
    }

    fn compile(&self, input: EngineInput<'_, Self::Fonts>) -> Result<Vec<u8>, EngineError> {
        self.compile_calls.fetch_add(1, Ordering::SeqCst);

        let mut output = b"%SCRIPTED\n".to_vec();
        output.extend_from_slice(format!("fonts: {}\n", input.fonts.len()).as_bytes());

        for line in input.source.lines() {
            let line = line.trim();
            let loaded = if let Some(path) = directive(line, "#include") {
                input.resolver.load(FileRef::Local(Path::new(path)))
            } else if let Some(reference) = directive(line, "#import") {
                let (spec, path) = parse_package(reference)
                    .ok_or_else(|| failure(format!("malformed package reference: {reference}")))?;
                input.resolver.load(FileRef::Package { spec: &spec, path: &path })
            } else if let Some(message) = line.strip_prefix("#fail") {
                return Err(failure(message.trim()));
            } else if line == "#panic" {
                panic!("scripted engine panic");
            } else {
                output.extend_from_slice(line.as_bytes());
                output.push(b'\n');
                continue;
            };

            let data = loaded.map_err(|e| failure(e.to_string()))?;
            output.extend_from_slice(&data);
            output.push(b'\n');
        }

        Ok(output)
    }
}
