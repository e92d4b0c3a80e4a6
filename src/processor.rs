//! Report processing: decode, resolve, map, group, classify

use crate::error::{IssueError, ReportError, SkipReason};
use crate::mapping::{classify_severity, group_by_file, SourceCache};
use crate::report::{resolve_issue_types, Issue, ProjectSelection, ReportDecoder};
use crate::source::{FsReader, SourceReader};
use crate::types::{Diagnostic, DiagnosticSeverity, DiagnosticsResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// An issue that could not be turned into a diagnostic
#[derive(Debug, Clone, Serialize)]
pub struct SkippedIssue {
    pub file: PathBuf,
    pub line: u32,
    pub type_id: String,
    pub reason: SkipReason,
    pub detail: String,
}

impl SkippedIssue {
    fn new(issue: &Issue, error: &IssueError) -> Self {
        Self {
            file: issue.file.clone(),
            line: issue.line,
            type_id: issue.type_id.clone(),
            reason: error.reason(),
            detail: error.to_string(),
        }
    }
}

/// Counts for one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub files: usize,
    pub diagnostics: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Dropped issues per reason
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl PassSummary {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Result of processing one report
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessedReport {
    /// Per-file diagnostics in first-seen file order
    pub files: Vec<DiagnosticsResult>,
    pub skipped: Vec<SkippedIssue>,
}

impl ProcessedReport {
    pub fn diagnostic_count(&self) -> usize {
        self.files.iter().map(DiagnosticsResult::len).sum()
    }

    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.files.iter().map(|f| f.count(severity)).sum()
    }

    pub fn summary(&self) -> PassSummary {
        let mut skipped = BTreeMap::new();
        for issue in &self.skipped {
            *skipped.entry(issue.reason).or_insert(0) += 1;
        }
        PassSummary {
            files: self.files.len(),
            diagnostics: self.diagnostic_count(),
            errors: self.count(DiagnosticSeverity::Error),
            warnings: self.count(DiagnosticSeverity::Warning),
            skipped,
        }
    }
}

/// Turns report XML into per-file diagnostics
#[derive(Debug, Clone)]
pub struct ReportProcessor<R = FsReader> {
    reader: R,
    decoder: ReportDecoder,
    source: String,
}

impl ReportProcessor<FsReader> {
    /// Processor reading source files from disk
    pub fn new() -> Self {
        Self::with_reader(FsReader)
    }
}

impl Default for ReportProcessor<FsReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: SourceReader> ReportProcessor<R> {
    /// Processor reading source files through `reader`
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader,
            decoder: ReportDecoder::new(),
            source: crate::DEFAULT_SOURCE.to_string(),
        }
    }

    /// Choose which `<Project>` elements are read
    pub fn with_projects(mut self, projects: ProjectSelection) -> Self {
        self.decoder = ReportDecoder::with_projects(projects);
        self
    }

    /// Source label put on every diagnostic
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Decode a report and map every issue. Only structural problems in the
    /// report fail; issues that cannot be mapped are listed in `skipped`.
    pub fn process_report(
        &self,
        xml: &str,
        solution_dir: &Path,
    ) -> Result<ProcessedReport, ReportError> {
        let report = self.decoder.decode(xml, solution_dir)?;
        let issues = resolve_issue_types(&report.issue_types, report.issues);
        Ok(self.map_issues(issues))
    }

    /// Map already resolved issues
    pub fn map_issues(&self, issues: Vec<Issue>) -> ProcessedReport {
        let mut cache = SourceCache::new(&self.reader);
        let mut processed = ProcessedReport::default();

        for group in group_by_file(issues) {
            let mut result = DiagnosticsResult::new(group.file);
            for issue in &group.issues {
                match self.to_diagnostic(issue, &mut cache) {
                    Ok(diagnostic) => result.add(diagnostic),
                    Err(error) => {
                        tracing::warn!(
                            file = %issue.file.display(),
                            line = issue.line,
                            type_id = %issue.type_id,
                            reason = %error.reason(),
                            "skipping issue: {}",
                            error
                        );
                        processed.skipped.push(SkippedIssue::new(issue, &error));
                    }
                }
            }
            if !result.is_empty() {
                processed.files.push(result);
            }
        }

        tracing::debug!(
            files = processed.files.len(),
            diagnostics = processed.diagnostic_count(),
            skipped = processed.skipped.len(),
            sources = cache.len(),
            "mapped issues"
        );
        processed
    }

    fn to_diagnostic(
        &self,
        issue: &Issue,
        cache: &mut SourceCache<'_, R>,
    ) -> Result<Diagnostic, IssueError> {
        let severity = classify_severity(issue)?;
        let range = cache.map_issue(issue)?;
        let href = issue
            .issue_type
            .as_ref()
            .and_then(|t| t.wiki_url.as_deref());

        Ok(
            Diagnostic::new(severity, range, issue.message.as_str(), issue.type_id.as_str())
                .with_source(self.source.as_str())
                .with_href(href),
        )
    }
}
