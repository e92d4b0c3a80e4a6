//! Inspection report model, decoding, and issue type resolution

pub mod decoder;
pub mod model;
pub mod resolver;

pub use decoder::{decode_report, resolve_path, ProjectSelection, ReportDecoder};
pub use model::{Issue, IssueSeverity, IssueType, Offset, Report};
pub use resolver::{resolve_issue_types, IssueTypeIndex};
