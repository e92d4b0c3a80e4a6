//! File grouping and severity classification

use crate::error::IssueError;
use crate::report::{Issue, IssueSeverity};
use crate::types::DiagnosticSeverity;
use std::collections::HashMap;
use std::path::PathBuf;

/// Issues belonging to one file, in report order
#[derive(Debug, Clone, PartialEq)]
pub struct FileIssueGroup {
    pub file: PathBuf,
    pub issues: Vec<Issue>,
}

/// Group issues by file, keeping first-seen order of files and of issues
pub fn group_by_file(issues: Vec<Issue>) -> Vec<FileIssueGroup> {
    let mut groups: Vec<FileIssueGroup> = Vec::new();
    let mut index: HashMap<PathBuf, usize> = HashMap::new();

    for issue in issues {
        match index.get(&issue.file) {
            Some(&i) => groups[i].issues.push(issue),
            None => {
                index.insert(issue.file.clone(), groups.len());
                groups.push(FileIssueGroup {
                    file: issue.file.clone(),
                    issues: vec![issue],
                });
            }
        }
    }

    groups
}

/// Severity of an issue, from its resolved issue type
pub fn classify_severity(issue: &Issue) -> Result<DiagnosticSeverity, IssueError> {
    let issue_type = issue
        .issue_type
        .as_ref()
        .ok_or_else(|| IssueError::UnresolvedIssueType(issue.type_id.clone()))?;
    Ok(IssueSeverity::parse(&issue_type.severity)?.to_diagnostic())
}
