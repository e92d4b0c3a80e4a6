//! Mapping issues onto file ranges and grouping them per file

pub mod grouping;
pub mod range;

pub use grouping::{classify_severity, group_by_file, FileIssueGroup};
pub use range::{LineTable, SourceCache};
