//! inspect-diagnostics CLI - inspectcode reports as editor diagnostics

use clap::{Parser, Subcommand, ValueEnum};
use inspect_diagnostics::host::{find_solutions, CommandTool, InspectionTool};
use inspect_diagnostics::{
    DiagnosticSeverity, DiagnosticsResult, InspectConfig, InspectionSession, MemorySink,
    PassSummary, ReportProcessor,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "inspect-diagnostics")]
#[command(about = "Map inspectcode XML reports onto source diagnostics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: auto-detect .inspect-diagnostics.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Only show errors (hide warnings, suggestions and hints)
    #[arg(long, global = true)]
    errors_only: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Map an existing report onto its source files
    Check {
        /// Report XML written by inspectcode
        report: PathBuf,

        /// Solution file or its directory (default: current dir)
        #[arg(long)]
        solution: Option<PathBuf>,
    },
    /// Run inspectcode on a solution, then map its report
    Inspect {
        /// Solution file to inspect
        solution: PathBuf,

        /// Workspace root holding the report directory (default: current dir)
        #[arg(long)]
        workspace: Option<PathBuf>,
    },
    /// List solution files in a workspace
    Solutions {
        /// Workspace root (default: current dir)
        root: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: &'a [DiagnosticsResult],
    summary: &'a PassSummary,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let workspace = match &cli.command {
        Commands::Inspect {
            workspace: Some(dir),
            ..
        } => dir.clone(),
        Commands::Solutions { root: Some(dir) } => dir.clone(),
        _ => cwd.clone(),
    };

    let config = match &cli.config {
        Some(path) => InspectConfig::load(path)?,
        None => InspectConfig::load_default(&workspace)?,
    };
    init_logging(&config, cli.verbose);

    match &cli.command {
        Commands::Solutions { .. } => {
            let solutions = find_solutions(&workspace, &config.discovery);
            match cli.format {
                OutputFormat::Text => {
                    for solution in &solutions {
                        println!("{}", solution.display());
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&solutions)?),
            }
            if solutions.is_empty() {
                eprintln!(
                    "No *.{} file found in {}",
                    config.discovery.extension,
                    workspace.display()
                );
            }
            Ok(false)
        }
        Commands::Check { report, solution } => {
            let solution_dir = solution_dir(solution.as_deref().unwrap_or(cwd.as_path()));
            publish(&cli, &config, report, &solution_dir)
        }
        Commands::Inspect { solution, .. } => {
            let report = config.report_path(&workspace);
            CommandTool::from_settings(&config.tool).run(solution, &report)?;
            publish(&cli, &config, &report, &solution_dir(solution))
        }
    }
}

fn init_logging(config: &InspectConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Directory issue paths are relative to
fn solution_dir(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        path.to_path_buf()
    }
}

fn publish(
    cli: &Cli,
    config: &InspectConfig,
    report: &Path,
    solution_dir: &Path,
) -> Result<bool, Box<dyn std::error::Error>> {
    let processor = ReportProcessor::new()
        .with_projects(config.projects)
        .with_source(config.source.as_str());
    let session = InspectionSession::with_processor(processor, MemorySink::new());

    let summary = session.publish_report_file(report, solution_dir)?;
    let mut files = session.sink().snapshot();

    if cli.errors_only {
        for file in &mut files {
            file.diagnostics
                .retain(|d| d.severity == DiagnosticSeverity::Error);
        }
        files.retain(|f| !f.is_empty());
    }

    match cli.format {
        OutputFormat::Text => print_text(&files, &summary),
        OutputFormat::Json => {
            let output = JsonOutput {
                files: &files,
                summary: &summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(summary.errors > 0)
}

fn print_text(files: &[DiagnosticsResult], summary: &PassSummary) {
    for file in files {
        for diag in &file.diagnostics {
            println!(
                "{}:{}:{}: {} [{}] {}",
                file.file.display(),
                diag.range.start.line + 1,
                diag.range.start.character + 1,
                diag.severity.as_str().to_uppercase(),
                diag.code,
                diag.message
            );
        }
    }

    if !files.is_empty() {
        println!();
    }

    println!(
        "{} error(s), {} warning(s) in {} file(s)",
        summary.errors, summary.warnings, summary.files
    );

    if summary.skipped_total() > 0 {
        let reasons: Vec<_> = summary
            .skipped
            .iter()
            .map(|(reason, count)| format!("{}: {}", reason, count))
            .collect();
        println!(
            "{} issue(s) skipped ({})",
            summary.skipped_total(),
            reasons.join(", ")
        );
    }
}
