//! Miette rendering for extracted diagnostics.

use std::fmt;

use miette::{Diagnostic, Severity};

use super::{DiagnosticContext, DiagnosticSeverity, ExtractedDiagnostic};

/// Wrapper error type that implements Diagnostic for ExtractedDiagnostic
#[derive(Debug)]
pub struct DiagnosticError {
    diag: ExtractedDiagnostic,
}

impl DiagnosticError {
    pub fn diagnostic(&self) -> &ExtractedDiagnostic {
        &self.diag
    }
}

impl std::error::Error for DiagnosticError {}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.diag.context {
            Some(DiagnosticContext::UnresolvedImport {
                specifier,
                importer,
            }) => write!(f, "Could not resolve '{}' from '{}'", specifier, importer),
            _ => match &self.diag.file {
                Some(file) => write!(f, "{} ({})", self.diag.kind, file),
                None => write!(f, "{}", self.diag.message),
            },
        }
    }
}

impl Diagnostic for DiagnosticError {
    fn code(&self) -> Option<Box<dyn fmt::Display + '_>> {
        Some(Box::new(format!("kiln::{}", self.diag.kind)))
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.diag.severity {
            DiagnosticSeverity::Error => Severity::Error,
            DiagnosticSeverity::Warning => Severity::Warning,
        })
    }

    fn help(&self) -> Option<Box<dyn fmt::Display + '_>> {
        self.diag
            .help
            .as_ref()
            .map(|h| Box::new(h.clone()) as Box<dyn fmt::Display>)
    }
}

pub fn to_diagnostic_error(diag: ExtractedDiagnostic) -> DiagnosticError {
    DiagnosticError { diag }
}
