//! Configuration loading
//!
//! Settings come from a YAML file in the workspace root:
//! - `.inspect-diagnostics.yaml` / `.inspect-diagnostics.yml`
//! - `inspect-diagnostics.yaml` / `inspect-diagnostics.yml`

use crate::report::ProjectSelection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Config file names probed by [`InspectConfig::load_default`], in order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".inspect-diagnostics.yaml",
    ".inspect-diagnostics.yml",
    "inspect-diagnostics.yaml",
    "inspect-diagnostics.yml",
];

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Source label put on every diagnostic
    pub source: String,
    /// Which report projects to read
    pub projects: ProjectSelection,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// External inspector settings
    pub tool: ToolSettings,
    /// Solution discovery settings
    pub discovery: DiscoverySettings,
}

/// External inspector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Executable name or path
    pub command: String,
    /// Extra arguments appended after the output flag
    pub args: Vec<String>,
    /// Report location, relative to the workspace root
    pub report_path: PathBuf,
}

/// Solution discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Solution file extension (without dot)
    pub extension: String,
    /// Directory names never descended into
    pub exclude: Vec<String>,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            source: crate::DEFAULT_SOURCE.to_string(),
            projects: ProjectSelection::All,
            log_level: "info".to_string(),
            tool: ToolSettings::default(),
            discovery: DiscoverySettings::default(),
        }
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            command: "inspectcode".to_string(),
            args: Vec::new(),
            report_path: PathBuf::from("build").join("inspectcode.xml"),
        }
    }
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            extension: "sln".to_string(),
            exclude: vec![
                "node_modules".to_string(),
                "bin".to_string(),
                "obj".to_string(),
                ".git".to_string(),
            ],
        }
    }
}

impl InspectConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load the first config file found in `workspace_root`, or defaults.
    /// A config file that fails to parse is reported as an error.
    pub fn load_default(workspace_root: &Path) -> Result<Self, ConfigError> {
        match Self::find(workspace_root) {
            Some(path) => {
                tracing::debug!(config = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Locate a config file in `workspace_root`
    pub fn find(workspace_root: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| workspace_root.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Absolute report location for a workspace
    pub fn report_path(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.tool.report_path)
    }
}
