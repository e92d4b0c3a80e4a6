//! Error types
//!
//! [`ReportError`] aborts a whole pass before anything is published.
//! [`IssueError`] only drops the issue it was raised for.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while reading or decoding a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Malformed report: expected root element <Report>, found <{0}>")]
    UnexpectedRoot(String),

    #[error("Malformed report: missing <{0}> section")]
    MissingSection(&'static str),

    #[error("Malformed report: <{element}> at line {line} has no {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
        line: u32,
    },

    #[error("Malformed report: invalid offset '{value}' at line {line} (expected START-END)")]
    InvalidOffset { value: String, line: u32 },

    #[error("Malformed report: {attribute} '{value}' at line {line} is not an integer")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
        line: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// True for structural problems in the report itself (as opposed to I/O)
    pub fn is_malformed(&self) -> bool {
        !matches!(self, ReportError::Io(_))
    }
}

/// Why an issue was dropped from a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    OutOfRange,
    UnknownSeverity,
    UnresolvedIssueType,
    FileNotFound,
    Io,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::OutOfRange => "out-of-range",
            SkipReason::UnknownSeverity => "unknown-severity",
            SkipReason::UnresolvedIssueType => "unresolved-issue-type",
            SkipReason::FileNotFound => "file-not-found",
            SkipReason::Io => "io",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recoverable failure for a single issue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    #[error("line {line} is out of range ({line_count} lines)")]
    LineOutOfRange { line: u32, line_count: usize },

    #[error("offset {offset} precedes the start of line {line} (offset {line_start})")]
    OffsetOutOfRange {
        line: u32,
        offset: usize,
        line_start: usize,
    },

    #[error("column {column} on line {line} does not fit a position")]
    ColumnOverflow { line: u32, column: usize },

    #[error("unknown severity '{0}'")]
    UnknownSeverity(String),

    #[error("no issue type with id '{0}'")]
    UnresolvedIssueType(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("cannot read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl IssueError {
    pub fn reason(&self) -> SkipReason {
        match self {
            IssueError::LineOutOfRange { .. }
            | IssueError::OffsetOutOfRange { .. }
            | IssueError::ColumnOverflow { .. } => SkipReason::OutOfRange,
            IssueError::UnknownSeverity(_) => SkipReason::UnknownSeverity,
            IssueError::UnresolvedIssueType(_) => SkipReason::UnresolvedIssueType,
            IssueError::FileNotFound(_) => SkipReason::FileNotFound,
            IssueError::Io { .. } => SkipReason::Io,
        }
    }

    /// Classify an I/O failure on a source file
    pub fn from_io(path: PathBuf, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            IssueError::FileNotFound(path)
        } else {
            IssueError::Io {
                path,
                message: err.to_string(),
            }
        }
    }
}
