//! inspectcode report diagnostics library
//!
//! Turns the XML report written by the `inspectcode` inspector into
//! per-file editor diagnostics:
//! - Decoding issue types and issues from the attribute-based XML
//! - Resolving each issue's type metadata
//! - Mapping file offsets to zero-based line/column ranges
//! - Grouping by file and classifying severity
//! - Publishing through a [`DiagnosticSink`]
//!
//! # Example
//!
//! ```
//! use inspect_diagnostics::{MemorySources, ReportProcessor};
//! use std::path::Path;
//!
//! let xml = r#"<Report>
//!   <IssueTypes>
//!     <IssueType Id="UnusedVariable" Severity="WARNING" />
//!   </IssueTypes>
//!   <Issues>
//!     <Project Name="App">
//!       <Issue TypeId="UnusedVariable" File="Program.cs" Offset="4-7" Line="2" Message="Unused" />
//!     </Project>
//!   </Issues>
//! </Report>"#;
//!
//! let sources = MemorySources::new().with("/sln/Program.cs", "abc\ndefgh\nij");
//! let processor = ReportProcessor::with_reader(sources);
//! let result = processor.process_report(xml, Path::new("/sln")).unwrap();
//!
//! let diagnostic = &result.files[0].diagnostics[0];
//! assert_eq!(diagnostic.range.start.line, 1);
//! assert_eq!(diagnostic.range.start.character, 1);
//! assert_eq!(diagnostic.range.end.character, 4);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod mapping;
mod processor;
pub mod report;
mod session;
pub mod sink;
pub mod source;
mod types;

pub use config::{ConfigError, InspectConfig};
pub use error::{IssueError, ReportError, SkipReason};
pub use mapping::{classify_severity, group_by_file, FileIssueGroup, LineTable, SourceCache};
pub use processor::{PassSummary, ProcessedReport, ReportProcessor, SkippedIssue};
pub use report::{decode_report, Issue, IssueType, Offset, ProjectSelection, Report};
pub use session::InspectionSession;
pub use sink::{DiagnosticSink, MemorySink};
pub use source::{FsReader, MemorySources, SourceReader};
pub use types::{Diagnostic, DiagnosticSeverity, DiagnosticsResult, Position, Range};

use std::path::Path;

/// Default `source` label on published diagnostics
pub const DEFAULT_SOURCE: &str = "inspectcode";

/// Process a report, reading source files from disk
pub fn process_report(xml: &str, solution_dir: &Path) -> Result<ProcessedReport, ReportError> {
    ReportProcessor::new().process_report(xml, solution_dir)
}
