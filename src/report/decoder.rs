//! XML decoding of inspection reports
//!
//! Every field lives in an attribute. Repeated elements are read by walking
//! the parent's element children, so one child and many children both come
//! out as a sequence in document order.

use super::model::{parse_decimal, Issue, IssueType, Offset, Report};
use crate::error::ReportError;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which `<Project>` elements under `<Issues>` are read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSelection {
    /// Every project in the report
    #[default]
    All,
    /// Only the first project
    First,
}

/// Decoder for inspection report XML
#[derive(Debug, Clone, Default)]
pub struct ReportDecoder {
    projects: ProjectSelection,
}

impl ReportDecoder {
    /// Create a decoder reading all projects
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with an explicit project selection
    pub fn with_projects(projects: ProjectSelection) -> Self {
        Self { projects }
    }

    /// Decode a report. Issue paths are joined onto `solution_dir`.
    pub fn decode(&self, xml: &str, solution_dir: &Path) -> Result<Report, ReportError> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != "Report" {
            return Err(ReportError::UnexpectedRoot(
                root.tag_name().name().to_string(),
            ));
        }

        let types_node =
            child_element(root, "IssueTypes").ok_or(ReportError::MissingSection("IssueTypes"))?;
        let issues_node =
            child_element(root, "Issues").ok_or(ReportError::MissingSection("Issues"))?;

        let issue_types = child_elements(types_node, "IssueType")
            .map(|node| decode_issue_type(&doc, node).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        let mut projects: Vec<Node> = child_elements(issues_node, "Project").collect();
        if self.projects == ProjectSelection::First {
            projects.truncate(1);
        }

        let mut issues = Vec::new();
        for project in projects {
            let name = project.attribute("Name");
            for node in child_elements(project, "Issue") {
                issues.push(decode_issue(&doc, node, name, solution_dir)?);
            }
        }

        tracing::debug!(
            issue_types = issue_types.len(),
            issues = issues.len(),
            "decoded report"
        );

        Ok(Report {
            issue_types,
            issues,
        })
    }
}

/// Decode a report reading every project
pub fn decode_report(xml: &str, solution_dir: &Path) -> Result<Report, ReportError> {
    ReportDecoder::new().decode(xml, solution_dir)
}

fn decode_issue_type(doc: &Document, node: Node) -> Result<IssueType, ReportError> {
    let line = line_of(doc, node);
    Ok(IssueType {
        id: required(node, "IssueType", "Id", line)?.to_string(),
        category: optional(node, "Category"),
        category_id: optional(node, "CategoryId"),
        description: optional(node, "Description"),
        severity: required(node, "IssueType", "Severity", line)?.to_string(),
        wiki_url: node.attribute("WikiUrl").map(str::to_string),
    })
}

fn decode_issue(
    doc: &Document,
    node: Node,
    project: Option<&str>,
    solution_dir: &Path,
) -> Result<Issue, ReportError> {
    let line = line_of(doc, node);
    let file = required(node, "Issue", "File", line)?;

    // The inspector leaves out Line for findings on the first line
    let issue_line = match node.attribute("Line") {
        Some(value) => parse_decimal(value).ok_or_else(|| ReportError::InvalidNumber {
            attribute: "Line",
            value: value.to_string(),
            line,
        })?,
        None => 1,
    };

    let raw_offset = required(node, "Issue", "Offset", line)?;
    let offset = Offset::parse(raw_offset).ok_or_else(|| ReportError::InvalidOffset {
        value: raw_offset.to_string(),
        line,
    })?;

    Ok(Issue {
        file: resolve_path(solution_dir, file),
        line: issue_line,
        offset,
        message: optional(node, "Message"),
        type_id: required(node, "Issue", "TypeId", line)?.to_string(),
        project: project.map(str::to_string),
        issue_type: None,
    })
}

/// Join a report path onto the solution directory, accepting `\` or `/`.
/// Absolute paths, including drive-letter and UNC paths from Windows
/// reports, are kept as written.
pub fn resolve_path(solution_dir: &Path, file: &str) -> PathBuf {
    if Path::new(file).is_absolute() || is_windows_absolute(file) {
        return PathBuf::from(file);
    }
    let mut path = solution_dir.to_path_buf();
    for part in file.split(|c: char| c == '/' || c == '\\') {
        if !part.is_empty() && part != "." {
            path.push(part);
        }
    }
    path
}

fn is_windows_absolute(file: &str) -> bool {
    let separator = |b: u8| b == b'\\' || b == b'/';
    match file.as_bytes() {
        [drive, b':', sep, ..] => drive.is_ascii_alphabetic() && separator(*sep),
        [b'\\', b'\\', ..] => true,
        _ => false,
    }
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |c| c.is_element() && c.tag_name().name() == name)
}

fn required<'a>(
    node: Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
    line: u32,
) -> Result<&'a str, ReportError> {
    node.attribute(attribute)
        .ok_or(ReportError::MissingAttribute {
            element,
            attribute,
            line,
        })
}

fn optional(node: Node, attribute: &str) -> String {
    node.attribute(attribute).unwrap_or_default().to_string()
}

fn line_of(doc: &Document, node: Node) -> u32 {
    doc.text_pos_at(node.range().start).row
}
