//! Issue to diagnostic translation
//!
//! Issues use 1-based lines and columns, the protocol is 0-based:
//!
//! - precise position `(l, c)` starts at `(l - 1, c - 1)`
//! - line only `l` starts at `(l - 1, 0)`
//! - file level starts at `(0, 0)`
//!
//! A range starting at column 0 covers the whole line (ends at the start
//! of the next one); any other range is one character wide.

use gherkin_lint::{severity_of, CrossFileIssue, Issue, Severity};
use tower_lsp::lsp_types::{
    Diagnostic as LspDiagnostic, DiagnosticSeverity as LspDiagnosticSeverity, NumberOrString,
    Position as LspPosition, Range as LspRange,
};

/// Source tag carried by every diagnostic
pub const SOURCE: &str = "gherkin-analyzer";

/// Convert a per-file issue
pub fn to_lsp_diagnostic(issue: &Issue) -> LspDiagnostic {
    let start = match (issue.position, issue.line) {
        (Some(position), _) => LspPosition {
            line: position.line.saturating_sub(1),
            character: position.column.saturating_sub(1),
        },
        (None, Some(line)) => line_start(line),
        (None, None) => LspPosition {
            line: 0,
            character: 0,
        },
    };
    diagnostic(start, issue.rule_key, &issue.message)
}

/// Convert a cross-file issue; always line based
pub fn cross_file_to_lsp_diagnostic(issue: &CrossFileIssue) -> LspDiagnostic {
    diagnostic(line_start(issue.line), issue.rule_key, &issue.message)
}

pub fn to_lsp_diagnostics(issues: &[Issue]) -> Vec<LspDiagnostic> {
    issues.iter().map(to_lsp_diagnostic).collect()
}

/// Convert our severity to the protocol's
pub fn to_lsp_severity(severity: Severity) -> LspDiagnosticSeverity {
    match severity {
        Severity::Error => LspDiagnosticSeverity::ERROR,
        Severity::Warning => LspDiagnosticSeverity::WARNING,
        Severity::Information => LspDiagnosticSeverity::INFORMATION,
        Severity::Hint => LspDiagnosticSeverity::HINT,
    }
}

fn line_start(line: u32) -> LspPosition {
    LspPosition {
        line: line.saturating_sub(1),
        character: 0,
    }
}

fn range_from(start: LspPosition) -> LspRange {
    let end = if start.character == 0 {
        LspPosition {
            line: start.line + 1,
            character: 0,
        }
    } else {
        LspPosition {
            line: start.line,
            character: start.character + 1,
        }
    };
    LspRange { start, end }
}

fn diagnostic(start: LspPosition, rule_key: &str, message: &str) -> LspDiagnostic {
    LspDiagnostic {
        range: range_from(start),
        severity: Some(to_lsp_severity(severity_of(rule_key))),
        code: Some(NumberOrString::String(rule_key.to_string())),
        code_description: None,
        source: Some(SOURCE.to_string()),
        message: message.to_string(),
        related_information: None,
        tags: None,
        data: None,
    }
}
