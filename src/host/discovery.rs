//! Solution file discovery

use crate::config::DiscoverySettings;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Find solution files under `root`, sorted by path
pub fn find_solutions(root: &Path, settings: &DiscoverySettings) -> Vec<PathBuf> {
    let mut solutions: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e, &settings.exclude))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case(settings.extension.as_str()))
                .unwrap_or(false)
        })
        .collect();
    solutions.sort();
    solutions
}

fn is_excluded(entry: &DirEntry, exclude: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| exclude.iter().any(|x| x == name))
            .unwrap_or(false)
}
