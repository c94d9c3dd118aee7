//! Typst messages as folio diagnostics.

use folio_traits::{Diagnostic, Severity};
use typst::diag::{self, SourceDiagnostic};

fn convert(diagnostic: &SourceDiagnostic) -> Diagnostic {
    let severity = match diagnostic.severity {
        diag::Severity::Error => Severity::Error,
        diag::Severity::Warning => Severity::Warning,
    };
    Diagnostic {
        severity,
        message: diagnostic.message.to_string(),
        hints: diagnostic.hints.iter().map(ToString::to_string).collect(),
    }
}

/// Errors first, then the warnings gathered before the failure.
pub(crate) fn collect(errors: &[SourceDiagnostic], warnings: &[SourceDiagnostic]) -> Vec<Diagnostic> {
    errors.iter().chain(warnings).map(convert).collect()
}
