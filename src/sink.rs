//! Diagnostic sink: where per-file diagnostics are published

use crate::types::{Diagnostic, DiagnosticsResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Receiver of published diagnostics, implemented by the host editor layer
pub trait DiagnosticSink: Send + Sync {
    /// Drop every file's diagnostics and publish `results` in one step
    fn replace_all(&self, results: Vec<DiagnosticsResult>);

    /// Remove diagnostics for one file
    fn clear_file(&self, file: &Path);

    /// Remove all diagnostics
    fn clear_all(&self);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn replace_all(&self, results: Vec<DiagnosticsResult>) {
        (**self).replace_all(results)
    }

    fn clear_file(&self, file: &Path) {
        (**self).clear_file(file)
    }

    fn clear_all(&self) {
        (**self).clear_all()
    }
}

/// Thread-safe in-memory sink.
/// Files are kept in the order they were published.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: RwLock<Vec<DiagnosticsResult>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics currently published for a file
    pub fn get(&self, file: &Path) -> Option<Vec<Diagnostic>> {
        self.read()
            .iter()
            .find(|result| result.file == file)
            .map(|result| result.diagnostics.clone())
    }

    /// Files that currently have diagnostics, in publication order
    pub fn files(&self) -> Vec<PathBuf> {
        self.read().iter().map(|result| result.file.clone()).collect()
    }

    /// Snapshot of every file's diagnostics, in publication order
    pub fn snapshot(&self) -> Vec<DiagnosticsResult> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Writes are single retain/clear/swap operations, so a poisoned list is
    // still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Vec<DiagnosticsResult>> {
        self.files.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<DiagnosticsResult>> {
        self.files.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl DiagnosticSink for MemorySink {
    fn replace_all(&self, results: Vec<DiagnosticsResult>) {
        let mut next: Vec<DiagnosticsResult> = Vec::with_capacity(results.len());
        let mut index: HashMap<PathBuf, usize> = HashMap::with_capacity(results.len());
        for result in results {
            match index.get(&result.file) {
                Some(&i) => next[i].diagnostics.extend(result.diagnostics),
                None => {
                    index.insert(result.file.clone(), next.len());
                    next.push(result);
                }
            }
        }
        *self.write() = next;
    }

    fn clear_file(&self, file: &Path) {
        self.write().retain(|result| result.file != file);
    }

    fn clear_all(&self) {
        self.write().clear();
    }
}
