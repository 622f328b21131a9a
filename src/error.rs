//
// error.rs
// LJPEG-Tools-rs
//
// Typed errors for directory scanning and run configuration, plus the exit status mapping used by the CLI.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;

/// Reasons a directory could not be enumerated. All of them mean "zero matches".
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("error opening directory '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn path(&self) -> &Path {
        match self {
            ScanError::NotFound(path) | ScanError::NotADirectory(path) => path,
            ScanError::Unreadable { path, .. } => path,
        }
    }
}

/// Invalid combinations of CLI options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one file extension must be allowed")]
    NoExtensions,

    #[error("extension '{0}' is empty or contains a path separator")]
    InvalidExtension(String),

    #[error("number of jobs must be greater than zero")]
    ZeroJobs,

    #[error("no directory supplied")]
    MissingDirectory,
}

/// Final status of a run, mapped onto distinct process exit codes so scripts can tell outcomes apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    UnexpectedError,
    InvalidUsage,
    DirectoryUnreadable,
    NoMatches,
    InvocationsFailed,
}

impl RunStatus {
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::UnexpectedError => 1,
            RunStatus::InvalidUsage => 2,
            RunStatus::DirectoryUnreadable => 3,
            RunStatus::NoMatches => 4,
            RunStatus::InvocationsFailed => 5,
        }
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        ExitCode::from(status.code())
    }
}
