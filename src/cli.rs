//
// cli.rs
// LJPEG-Tools-rs
//
// Defines the CLI surface with Clap and drives a run: scan the directory, invoke the tool, report.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{CommandFactory, Parser};
use tracing::Level;

use crate::batch::{self, BatchInvoker};
use crate::config::{AllowedExtensions, BatchConfig, DEFAULT_EXTENSION, DEFAULT_TOOL};
use crate::error::{ConfigError, RunStatus};
use crate::models::{BatchSummary, ScanResult};
use crate::report::{self, RunReport};
use crate::scan::DirectoryScanner;
use crate::tool::ExternalTool;

/// Command-line interface: one positional directory plus a few knobs around the external tool.
#[derive(Parser, Debug)]
#[command(name = "ljpeg-tools", version)]
#[command(
    about = "Decompress every DDSM LJPEG image in a directory to LJPEG1 using the external jpeg tool",
    long_about = None
)]
pub struct Cli {
    /// Directory containing the LJPEG images
    pub directory: Option<PathBuf>,

    /// File extension to process (repeatable, case-insensitive)
    #[arg(short = 'e', long = "extension", value_name = "EXT", default_value = DEFAULT_EXTENSION)]
    pub extensions: Vec<String>,

    /// Decompression executable, invoked as `<tool> -d -s <file>`
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_TOOL)]
    pub tool: PathBuf,

    /// Number of files decompressed at the same time
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Also look for images in subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Write a JSON summary of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl TryFrom<Cli> for BatchConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let directory = cli.directory.ok_or(ConfigError::MissingDirectory)?;
        let config = BatchConfig {
            directory,
            extensions: AllowedExtensions::new(&cli.extensions)?,
            tool: cli.tool,
            jobs: cli.jobs,
            recursive: cli.recursive,
            report: cli.report,
        };
        config.validate()?;
        Ok(config)
    }
}

pub fn run() -> Result<RunStatus> {
    // Parse the raw CLI arguments once and hand them to the driver.
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<RunStatus> {
    init_tracing(cli.verbose, cli.quiet);

    if cli.directory.is_none() {
        println!("No arguments supplied!");
        Cli::command().print_help()?;
        println!();
        return Ok(RunStatus::InvalidUsage);
    }

    let config = match BatchConfig::try_from(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid arguments: {}", err);
            return Ok(RunStatus::InvalidUsage);
        }
    };

    execute(&config)
}

/// Scan, invoke, summarize. Never aborts on a per-file failure.
pub fn execute(config: &BatchConfig) -> Result<RunStatus> {
    let started_at = Utc::now();
    let scanner = DirectoryScanner::new(config.extensions.clone()).recursive(config.recursive);

    let (scan, scan_error) = match scanner.scan_directory(&config.directory) {
        Ok(scan) => (scan, None),
        Err(err) => {
            tracing::error!(error = %err, "Error opening directory");
            println!("Error opening directory '{}'!", err.path().display());
            (ScanResult::default(), Some(err.to_string()))
        }
    };

    let tool = ExternalTool::new(&config.tool);
    if !scan.matches.is_empty() {
        tool.preflight();
    }

    let summary = BatchInvoker::new(config.jobs).process_files(&scan.matches, &tool)?;
    batch::print_summary(&summary);

    if let Some(path) = &config.report {
        let report = RunReport::new(config, started_at, &scan, scan_error.clone(), &summary);
        report::write_report(path, &report)?;
    }

    Ok(final_status(scan_error.is_some(), &scan, &summary))
}

fn final_status(scan_failed: bool, scan: &ScanResult, summary: &BatchSummary) -> RunStatus {
    if scan_failed {
        RunStatus::DirectoryUnreadable
    } else if scan.matches.is_empty() {
        RunStatus::NoMatches
    } else if !summary.all_succeeded() {
        RunStatus::InvocationsFailed
    } else {
        RunStatus::Success
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    // Logs go to stderr so stdout stays the progress/summary channel.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
