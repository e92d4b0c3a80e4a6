//! External inspector invocation

use crate::config::ToolSettings;
use std::path::Path;
use std::process::Command;
use thiserror::Error;

/// Failure running the inspector
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create report directory: {0}")]
    ReportDir(#[source] std::io::Error),

    #[error("'{command}' exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Runs the inspector for a solution, writing the report to `output`
pub trait InspectionTool {
    fn run(&self, solution: &Path, output: &Path) -> Result<(), ToolError>;
}

/// Runs `<command> <solution> --output=<report> [args...]`
#[derive(Debug, Clone)]
pub struct CommandTool {
    command: String,
    args: Vec<String>,
}

impl CommandTool {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    pub fn from_settings(settings: &ToolSettings) -> Self {
        Self {
            command: settings.command.clone(),
            args: settings.args.clone(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn command_line(&self, solution: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(solution)
            .arg(format!("--output={}", output.display()))
            .args(&self.args);
        cmd
    }
}

impl InspectionTool for CommandTool {
    fn run(&self, solution: &Path, output: &Path) -> Result<(), ToolError> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ToolError::ReportDir)?;
        }

        tracing::info!(
            command = %self.command,
            solution = %solution.display(),
            output = %output.display(),
            "running inspector"
        );

        let result = self
            .command_line(solution, output)
            .output()
            .map_err(|source| ToolError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if result.status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                command: self.command.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            })
        }
    }
}
