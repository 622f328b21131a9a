//
// tool.rs
// LJPEG-Tools-rs
//
// Wraps the external `jpeg` utility that performs the actual LJPEG -> LJPEG1 decompression.
//
// Thales Matheus Mendonça Santos - October 2026

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::models::InvocationOutcome;

/// Flags asking the DDSM `jpeg` utility to decompress into LJPEG1.
pub const DECOMPRESS_ARGS: [&str; 2] = ["-d", "-s"];

/// Anything able to process one file and report how it went. The batch invoker only talks to this.
pub trait ToolRunner: Send + Sync {
    fn run(&self, file: &Path) -> InvocationOutcome;

    /// Human-readable command line, used for progress output.
    fn describe(&self, file: &Path) -> String;
}

/// An executable plus fixed leading arguments; the target file is always appended last.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self::with_args(program, DECOMPRESS_ARGS)
    }

    pub fn with_args<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Build the process invocation. No shell is involved, so file names are passed verbatim.
    pub fn command(&self, file: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(file);
        command
    }

    /// Resolve the executable: bare names through `PATH`, anything with a separator
    /// relative to the working directory.
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }

    /// Warn early when the tool is missing. The batch still runs so each file gets its own failure.
    pub fn preflight(&self) -> bool {
        match self.locate() {
            Some(path) => {
                tracing::debug!(tool = %path.display(), "Decompression tool found");
                true
            }
            None => {
                tracing::warn!(
                    tool = %self.program.display(),
                    "Decompression tool not found or not executable; invocations will fail"
                );
                false
            }
        }
    }
}

impl ToolRunner for ExternalTool {
    fn run(&self, file: &Path) -> InvocationOutcome {
        // stdout/stderr are inherited so the tool's own messages interleave with ours.
        match self.command(file).status() {
            Ok(status) => InvocationOutcome::from(status),
            Err(err) => InvocationOutcome::SpawnFailed {
                message: err.to_string(),
            },
        }
    }

    fn describe(&self, file: &Path) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line.push(' ');
        line.push_str(&file.display().to_string());
        line
    }
}
