//
// main.rs
// LJPEG-Tools-rs
//
// Binary entry point: runs the CLI and turns the outcome into a process exit code.
//
// Thales Matheus Mendonça Santos - October 2026

use std::process::ExitCode;

use ljpeg_tools::{cli, RunStatus};

fn main() -> ExitCode {
    // All argument parsing and dispatching lives in the CLI module.
    match cli::run() {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            RunStatus::UnexpectedError.into()
        }
    }
}
