//
// lib.rs
// LJPEG-Tools-rs
//
// Exposes the crate's modules and re-exports the CLI entry point for both binary and library consumers.
//
// Thales Matheus Mendonça Santos - October 2026

// Public surface of the library: scanning, invoking the external tool, and reporting.
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scan;
pub mod tool;

pub use batch::BatchInvoker;
pub use cli::{run as run_cli, Cli};
pub use config::{AllowedExtensions, BatchConfig};
pub use error::{ConfigError, RunStatus, ScanError};
pub use models::{BatchSummary, FileEntry, InvocationOutcome, ScanResult};
pub use scan::DirectoryScanner;
pub use tool::{ExternalTool, ToolRunner};
