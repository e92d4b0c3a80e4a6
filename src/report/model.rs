//! Report model: issue types and issue instances

use crate::error::IssueError;
use crate::types::DiagnosticSeverity;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Metadata describing a category of finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueType {
    pub id: String,
    pub category: String,
    pub category_id: String,
    pub description: String,
    /// Raw severity attribute, classified by [`IssueSeverity::parse`]
    pub severity: String,
    pub wiki_url: Option<String>,
}

/// Severity levels understood by the inspector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
    Suggestion,
    Hint,
}

impl IssueSeverity {
    /// Parse a report severity. Anything outside the four known values fails.
    pub fn parse(value: &str) -> Result<Self, IssueError> {
        match value {
            "ERROR" => Ok(IssueSeverity::Error),
            "WARNING" => Ok(IssueSeverity::Warning),
            "SUGGESTION" => Ok(IssueSeverity::Suggestion),
            "HINT" => Ok(IssueSeverity::Hint),
            other => Err(IssueError::UnknownSeverity(other.to_string())),
        }
    }

    pub fn to_diagnostic(self) -> DiagnosticSeverity {
        match self {
            IssueSeverity::Error => DiagnosticSeverity::Error,
            IssueSeverity::Warning => DiagnosticSeverity::Warning,
            IssueSeverity::Suggestion => DiagnosticSeverity::Information,
            IssueSeverity::Hint => DiagnosticSeverity::Hint,
        }
    }
}

/// Character span measured from the start of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Offset {
    pub start: usize,
    pub end: usize,
}

impl Offset {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Parse `"START-END"`, splitting on the first `-`
    pub fn parse(value: &str) -> Option<Self> {
        let (start, end) = value.split_once('-')?;
        Some(Self {
            start: parse_decimal(start)?,
            end: parse_decimal(end)?,
        })
    }
}

/// Strict base-10 parse: digits only, no sign or whitespace
pub(crate) fn parse_decimal<T: std::str::FromStr>(value: &str) -> Option<T> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// One finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Absolute path of the file the issue belongs to
    pub file: PathBuf,
    /// 1-based line
    pub line: u32,
    pub offset: Offset,
    pub message: String,
    pub type_id: String,
    /// Name of the `<Project>` the issue was listed under
    pub project: Option<String>,
    /// Set by the resolver; `None` when `type_id` is unknown
    #[serde(skip)]
    pub issue_type: Option<Arc<IssueType>>,
}

/// A decoded report
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub issue_types: Vec<Arc<IssueType>>,
    pub issues: Vec<Issue>,
}
