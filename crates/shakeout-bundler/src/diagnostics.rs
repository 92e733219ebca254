//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown diagnostics are passed through to the caller. This module only
//! classifies them and attaches a hint for the failures a tree-shaking run
//! typically hits: a symbol the compiled entry does not export, or an import
//! that is neither resolvable nor declared external.

use serde::{Deserialize, Serialize};

/// Diagnostic information extracted from a Rolldown error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub help: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingExport,
    UnresolvedEntry,
    UnresolvedImport,
    ParseError,
    Plugin,
    Other,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiagnosticKind::MissingExport => "MissingExport",
            DiagnosticKind::UnresolvedEntry => "UnresolvedEntry",
            DiagnosticKind::UnresolvedImport => "UnresolvedImport",
            DiagnosticKind::ParseError => "ParseError",
            DiagnosticKind::Plugin => "Plugin",
            DiagnosticKind::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Extract diagnostics from a Rolldown error value.
///
/// Rolldown's batched error type has no stable public accessors, so the
/// debug representation is classified instead.
pub fn extract_from_rolldown_error(error: &dyn std::fmt::Debug) -> Vec<ExtractedDiagnostic> {
    let error_str = format!("{error:?}");
    vec![classify(&error_str)]
}

fn classify(error_str: &str) -> ExtractedDiagnostic {
    let kind = if error_str.contains("MissingExport") || error_str.contains("is not exported") {
        DiagnosticKind::MissingExport
    } else if error_str.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if error_str.contains("UnresolvedImport") || error_str.contains("Could not resolve")
    {
        DiagnosticKind::UnresolvedImport
    } else if error_str.contains("Parse error") || error_str.contains("Unexpected token") {
        DiagnosticKind::ParseError
    } else if error_str.contains("Plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other
    };

    let help = match kind {
        DiagnosticKind::MissingExport => Some(
            "A requested symbol is not exported by the compiled entry. Check the spelling, \
             or run `shakeout symbols` to list what is exported."
                .to_string(),
        ),
        DiagnosticKind::UnresolvedImport => Some(
            "An import could not be resolved. Declare it in package.json dependencies \
             or peerDependencies, or add it to the externals config."
                .to_string(),
        ),
        DiagnosticKind::UnresolvedEntry => {
            Some("The compiled library entry could not be resolved.".to_string())
        }
        _ => None,
    };

    ExtractedDiagnostic {
        kind,
        message: error_str.to_string(),
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_missing_export() {
        let diags = extract_from_rolldown_error(&"MissingExport: \"Nope\" is not exported");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MissingExport);
        assert!(diags[0].help.as_deref().unwrap().contains("shakeout symbols"));
    }

    #[test]
    fn classifies_unresolved_import() {
        let diags = extract_from_rolldown_error(&"Could not resolve 'd3-scale'");
        assert_eq!(diags[0].kind, DiagnosticKind::UnresolvedImport);
        assert!(diags[0].help.is_some());
    }

    #[test]
    fn unknown_errors_have_no_hint() {
        let diags = extract_from_rolldown_error(&"something odd");
        assert_eq!(diags[0].kind, DiagnosticKind::Other);
        assert!(diags[0].help.is_none());
    }
}
