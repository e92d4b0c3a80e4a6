//! Issue type resolution

use super::model::{Issue, IssueType};
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup from issue type id to its metadata
#[derive(Debug, Default)]
pub struct IssueTypeIndex {
    types: HashMap<String, Arc<IssueType>>,
}

impl IssueTypeIndex {
    /// Build the index. When an id repeats, the first definition wins.
    pub fn new(issue_types: &[Arc<IssueType>]) -> Self {
        let mut types = HashMap::with_capacity(issue_types.len());
        for issue_type in issue_types {
            types
                .entry(issue_type.id.clone())
                .or_insert_with(|| Arc::clone(issue_type));
        }
        Self { types }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<IssueType>> {
        self.types.get(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Attach issue types. Unknown ids stay unresolved.
    pub fn resolve(&self, issues: Vec<Issue>) -> Vec<Issue> {
        issues
            .into_iter()
            .map(|mut issue| {
                issue.issue_type = self.get(&issue.type_id).cloned();
                if issue.issue_type.is_none() {
                    tracing::debug!(type_id = %issue.type_id, "issue references an unknown issue type");
                }
                issue
            })
            .collect()
    }
}

/// Resolve every issue against the given issue types
pub fn resolve_issue_types(issue_types: &[Arc<IssueType>], issues: Vec<Issue>) -> Vec<Issue> {
    IssueTypeIndex::new(issue_types).resolve(issues)
}
