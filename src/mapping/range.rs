//! Offset-to-range mapping
//!
//! Offsets count UTF-16 code units from the start of the file, lines are
//! split on `\n` only, and every column is shifted by one to match the
//! inspector's offset encoding.

use crate::error::IssueError;
use crate::report::{Issue, Offset};
use crate::source::SourceReader;
use crate::types::Range;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Start offset of every line in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    line_starts: Vec<usize>,
}

impl LineTable {
    pub fn new(text: &str) -> Self {
        let mut line_starts = Vec::new();
        let mut offset = 0;
        for line in text.split('\n') {
            line_starts.push(offset);
            offset += line.encode_utf16().count() + 1;
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offset where a 1-based line begins
    pub fn line_start(&self, line: u32) -> Result<usize, IssueError> {
        let index = (line as usize).checked_sub(1);
        index
            .and_then(|i| self.line_starts.get(i).copied())
            .ok_or(IssueError::LineOutOfRange {
                line,
                line_count: self.line_count(),
            })
    }

    /// Map a 1-based line and file offsets to a zero-based single-line range.
    /// Columns past the end of the line are kept as-is.
    pub fn map(&self, line: u32, offset: Offset) -> Result<Range, IssueError> {
        let line_start = self.line_start(line)?;
        let start = column(line, offset.start, line_start)?;
        let end = column(line, offset.end, line_start)?;
        Ok(Range::new(line - 1, start, line - 1, end))
    }
}

fn column(line: u32, offset: usize, line_start: usize) -> Result<u32, IssueError> {
    let relative = offset
        .checked_sub(line_start)
        .ok_or(IssueError::OffsetOutOfRange {
            line,
            offset,
            line_start,
        })?;
    relative
        .checked_add(1)
        .and_then(|shifted| u32::try_from(shifted).ok())
        .ok_or(IssueError::ColumnOverflow {
            line,
            column: relative,
        })
}

/// Per-pass cache of line tables keyed by path.
/// Read failures are cached too so each file is read at most once.
pub struct SourceCache<'r, R: SourceReader + ?Sized> {
    reader: &'r R,
    tables: HashMap<PathBuf, Result<Arc<LineTable>, IssueError>>,
}

impl<'r, R: SourceReader + ?Sized> SourceCache<'r, R> {
    pub fn new(reader: &'r R) -> Self {
        Self {
            reader,
            tables: HashMap::new(),
        }
    }

    /// Line table for a file, reading it on first use
    pub fn table(&mut self, path: &Path) -> Result<Arc<LineTable>, IssueError> {
        if let Some(cached) = self.tables.get(path) {
            return cached.clone();
        }

        let loaded = self
            .reader
            .read(path)
            .map(|text| Arc::new(LineTable::new(&text)));
        match &loaded {
            Ok(table) => tracing::debug!(
                file = %path.display(),
                lines = table.line_count(),
                "loaded source"
            ),
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "cannot load source"),
        }
        self.tables.insert(path.to_path_buf(), loaded.clone());
        loaded
    }

    /// Compute the editor range for an issue
    pub fn map_issue(&mut self, issue: &Issue) -> Result<Range, IssueError> {
        self.table(&issue.file)?.map(issue.line, issue.offset)
    }

    /// Number of distinct files touched in this pass
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
