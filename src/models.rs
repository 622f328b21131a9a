//
// models.rs
// LJPEG-Tools-rs
//
// Defines the data structures shared by the scanner, the batch invoker and the JSON run report.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

use serde::{Deserialize, Serialize};

use crate::config::AllowedExtensions;

/// A directory entry name with its derived, case-folded extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub extension: Option<String>,
}

impl FileEntry {
    /// The extension is everything after the last `.`. A name without any `.` has no
    /// extension at all and therefore never matches; `file.` yields an empty one.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let extension = name
            .rfind('.')
            .map(|dot| name[dot + 1..].to_lowercase());
        Self { name, extension }
    }

    pub fn matches(&self, allowed: &AllowedExtensions) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| allowed.contains(ext))
    }
}

/// Outcome of one directory scan, in filesystem iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub matches: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// What happened to a single invocation of the decompression tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Succeeded,
    /// The tool ran and exited with a non-zero code.
    Failed { code: i32 },
    /// The tool was killed before exiting (Unix signals).
    Terminated { signal: Option<i32> },
    /// The process could not be started at all (missing binary, permissions...).
    SpawnFailed { message: String },
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Succeeded)
    }
}

impl From<ExitStatus> for InvocationOutcome {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            return InvocationOutcome::Succeeded;
        }
        match status.code() {
            Some(code) => InvocationOutcome::Failed { code },
            None => InvocationOutcome::Terminated {
                signal: termination_signal(&status),
            },
        }
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

impl fmt::Display for InvocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationOutcome::Succeeded => write!(f, "succeeded"),
            InvocationOutcome::Failed { code } => write!(f, "exited with status {}", code),
            InvocationOutcome::Terminated { signal: Some(signal) } => {
                write!(f, "terminated by signal {}", signal)
            }
            InvocationOutcome::Terminated { signal: None } => write!(f, "terminated"),
            InvocationOutcome::SpawnFailed { message } => write!(f, "could not start: {}", message),
        }
    }
}

/// A path whose invocation did not succeed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedInvocation {
    pub path: PathBuf,
    pub outcome: InvocationOutcome,
}

/// Tally of a batch: `attempted` always equals the number of paths handed to the invoker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<FailedInvocation>,
}

impl BatchSummary {
    pub fn record(&mut self, path: PathBuf, outcome: InvocationOutcome) {
        self.attempted += 1;
        if outcome.is_success() {
            self.succeeded.push(path);
        } else {
            self.failed.push(FailedInvocation { path, outcome });
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}
