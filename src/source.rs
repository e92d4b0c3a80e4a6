//! Source file access for range mapping

use crate::error::IssueError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads whole source files as text
pub trait SourceReader {
    fn read(&self, path: &Path) -> Result<String, IssueError>;
}

impl<R: SourceReader + ?Sized> SourceReader for &R {
    fn read(&self, path: &Path) -> Result<String, IssueError> {
        (**self).read(path)
    }
}

/// Reads from the file system. Invalid UTF-8 is replaced, not rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> Result<String, IssueError> {
        let bytes = fs::read(path).map_err(|e| IssueError::from_io(path.to_path_buf(), &e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// In-memory sources, e.g. unsaved editor buffers
#[derive(Debug, Clone, Default)]
pub struct MemorySources {
    files: HashMap<PathBuf, String>,
}

impl MemorySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    pub fn with(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }
}

impl SourceReader for MemorySources {
    fn read(&self, path: &Path) -> Result<String, IssueError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| IssueError::FileNotFound(path.to_path_buf()))
    }
}
