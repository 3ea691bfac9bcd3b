//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures (including errors raised by plugin stages) as
//! batched diagnostics. This module turns them into [`ExtractedDiagnostic`]s,
//! a cloneable, serializable form that does not depend on Rolldown's types.

mod report;

pub use report::{DiagnosticError, to_diagnostic_error};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Extracted diagnostic information from Rolldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub file: Option<String>,
    pub help: Option<String>,
    /// Structured context for the diagnostic (if available)
    pub context: Option<DiagnosticContext>,
}

/// Structured context for different diagnostic kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DiagnosticContext {
    UnresolvedImport {
        /// Import specifier that couldn't be resolved
        specifier: String,
        /// File that tried to import, or `<entry>`
        importer: String,
    },
    Plugin {
        plugin_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ParseError,
    UnresolvedEntry,
    UnresolvedImport,
    /// A component failed to compile
    Component,
    Plugin,
    Other(String),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::Component => write!(f, "Component"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Extract diagnostics from Rolldown error types.
///
/// Rolldown's diagnostic types are not stable across versions, so this works
/// from the `Debug` rendering.
pub fn extract_from_rolldown_error(error: &dyn fmt::Debug) -> Vec<ExtractedDiagnostic> {
    let error_str = format!("{error:?}");

    let parts: Vec<&str> = error_str
        .split("BuildDiagnostic")
        .filter(|s| !s.trim().is_empty() && s.trim() != "[" && s.trim() != "]")
        .collect();

    if parts.len() > 1 {
        parts.iter().map(|part| extract_single(part)).collect()
    } else {
        vec![extract_single(&error_str)]
    }
}

/// Extract a single diagnostic from a formatted error string.
pub(crate) fn extract_single(error_str: &str) -> ExtractedDiagnostic {
    let kind = if error_str.contains("Could not resolve") || error_str.contains("UnresolvedImport")
    {
        DiagnosticKind::UnresolvedImport
    } else if error_str.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if error_str.contains("Svelte file") {
        DiagnosticKind::Component
    } else if error_str.contains("Parse error") || error_str.contains("Expected") {
        DiagnosticKind::ParseError
    } else if error_str.contains("Plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other("BundlerError".to_string())
    };

    let severity = if error_str.contains("Severity::Warning") {
        DiagnosticSeverity::Warning
    } else {
        DiagnosticSeverity::Error
    };

    let context = match kind {
        DiagnosticKind::UnresolvedImport => unresolved_import_context(error_str),
        DiagnosticKind::Plugin | DiagnosticKind::Component => {
            extract_quoted_string_after(error_str, "plugin")
                .filter(|name| name.starts_with("kiln-"))
                .map(|plugin_name| DiagnosticContext::Plugin { plugin_name })
        }
        _ => None,
    };

    let file = match &context {
        Some(DiagnosticContext::UnresolvedImport { importer, .. }) if importer != "<entry>" => {
            Some(importer.clone())
        }
        _ => extract_file_path(error_str),
    };

    let help = match kind {
        DiagnosticKind::UnresolvedImport => Some(
            "Install the missing package, or check the specifier for typos.".to_string(),
        ),
        DiagnosticKind::Component => {
            Some("Check that every <script> and <style> tag is closed.".to_string())
        }
        _ => extract_help_text(error_str),
    };

    ExtractedDiagnostic {
        kind,
        severity,
        message: error_str.trim().to_string(),
        file,
        help,
        context,
    }
}

/// Parses `Could not resolve '<specifier>' from '<importer>'`.
fn unresolved_import_context(error_str: &str) -> Option<DiagnosticContext> {
    let after = &error_str[error_str.find("Could not resolve")?..];
    let specifier = extract_quoted_string(after)?;
    let importer = extract_quoted_string_after(after, " from ")?;

    Some(DiagnosticContext::UnresolvedImport {
        specifier,
        importer,
    })
}

fn extract_file_path(text: &str) -> Option<String> {
    for ext in [".svelte", ".mjs", ".js", ".ts", ".json"] {
        let Some(pos) = text.find(ext) else {
            continue;
        };
        let before = &text[..pos + ext.len()];
        let start = before
            .rfind([' ', '"', '\'', '`', '('])
            .map(|i| i + 1)
            .unwrap_or(0);
        let candidate = before[start..].trim_end_matches([':', ',']);
        if !candidate.is_empty() {
            return Some(candidate.to_string());
        }
    }
    None
}

fn extract_help_text(text: &str) -> Option<String> {
    ["help: ", "Help: ", "hint: "].iter().find_map(|indicator| {
        let pos = text.find(indicator)?;
        let help = text[pos + indicator.len()..].lines().next()?.trim();
        (!help.is_empty()).then(|| help.to_string())
    })
}

fn extract_quoted_string_after(text: &str, keyword: &str) -> Option<String> {
    let pos = text.find(keyword)?;
    extract_quoted_string(&text[pos + keyword.len()..])
}

/// Extract the first quoted string (single, double, or backtick)
fn extract_quoted_string(text: &str) -> Option<String> {
    let (start, quote) = text.char_indices().find(|(_, c)| matches!(c, '"' | '\'' | '`'))?;
    let after = &text[start + 1..];
    let end = after.find(quote)?;
    Some(after[..end].to_string())
}
