//! Rendering compile diagnostics and font listings for the terminal.

use folio_core::{Diagnostic, FontOrigin, FontRegistry};
use serde::Serialize;
use std::fmt::Write;

/// How `folio compile` prints diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DiagnosticFormat {
    /// One `severity: message` block per diagnostic
    #[default]
    Human,
    /// A single JSON object
    Json,
}

#[derive(Serialize)]
struct DiagnosticReport<'a> {
    errors: usize,
    warnings: usize,
    diagnostics: &'a [Diagnostic],
}

/// Renders the diagnostics of a failed compile in `format`. Returns an empty
/// string for an empty human report.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    format: DiagnosticFormat,
) -> Result<String, serde_json::Error> {
    match format {
        DiagnosticFormat::Human => {
            let mut out = String::new();
            for diagnostic in diagnostics {
                let _ = writeln!(out, "{diagnostic}");
            }
            Ok(out)
        }
        DiagnosticFormat::Json => {
            let errors = diagnostics
                .iter()
                .filter(|d| d.severity == folio_core::Severity::Error)
                .count();
            serde_json::to_string_pretty(&DiagnosticReport {
                errors,
                warnings: diagnostics.len() - errors,
                diagnostics,
            })
        }
    }
}

/// One line per registry entry: index, origin, size.
pub fn render_registry(registry: &FontRegistry) -> String {
    let mut out = String::new();
    for (index, entry) in registry.iter().enumerate() {
        let origin = match entry.origin() {
            FontOrigin::Builtin => "builtin",
            FontOrigin::Custom => "custom",
        };
        let _ = writeln!(out, "{index:>3}  {origin:<7}  {:>9} bytes", entry.len());
    }
    let _ = writeln!(
        out,
        "{} font files ({} builtin, {} custom), {} bytes",
        registry.len(),
        registry.builtin_count(),
        registry.custom().len(),
        registry.total_bytes()
    );
    out
}
