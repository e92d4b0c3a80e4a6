//! Diagnostic types

use serde::Serialize;
use std::path::PathBuf;

/// Diagnostic severity (matches LSP DiagnosticSeverity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Error: a definite problem
    Error = 1,
    /// Warning: a potential issue
    Warning = 2,
    /// Information: a suggestion from the inspector
    Information = 3,
    /// Hint: low-priority improvement
    Hint = 4,
}

impl DiagnosticSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Information => "information",
            DiagnosticSeverity::Hint => "hint",
        }
    }
}

/// Position in source (0-based line, 0-based UTF-16 column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Range in source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Range in the document
    pub range: Range,
    /// Message as reported by the inspector
    pub message: String,
    /// Issue type id
    pub code: String,
    /// Source label (e.g., "inspectcode")
    pub source: String,
    /// Documentation link for the issue type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        severity: DiagnosticSeverity,
        range: Range,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            range,
            message: message.into(),
            code: code.into(),
            source: crate::DEFAULT_SOURCE.to_string(),
            href: None,
        }
    }

    /// Override the source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Attach a documentation link; empty links are ignored
    pub fn with_href(mut self, href: Option<&str>) -> Self {
        self.href = href.filter(|h| !h.is_empty()).map(str::to_string);
        self
    }
}

/// Diagnostics published for one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsResult {
    pub file: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsResult {
    pub fn new(file: PathBuf) -> Self {
        Self {
            file,
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagnosticSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticSeverity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}
