use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::models::{BatchSummary, InvocationOutcome};
use crate::tool::ToolRunner;

/// Runs the decompression tool once per matched file.
///
/// One job (the default) is a plain sequential loop: each process is awaited before
/// the next one starts. More jobs use a bounded rayon pool; the summary keeps input order.
#[derive(Debug, Clone, Copy)]
pub struct BatchInvoker {
    jobs: usize,
}

impl Default for BatchInvoker {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

impl BatchInvoker {
    pub fn new(jobs: usize) -> Self {
        Self { jobs: jobs.max(1) }
    }

    pub fn process_files<R: ToolRunner>(&self, files: &[PathBuf], runner: &R) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        if self.jobs == 1 {
            for file in files {
                let outcome = invoke(runner, file);
                summary.record(file.clone(), outcome);
            }
            return Ok(summary);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .context("Failed to build worker pool")?;
        let outcomes: Vec<InvocationOutcome> =
            pool.install(|| files.par_iter().map(|file| invoke(runner, file)).collect());

        for (file, outcome) in files.iter().zip(outcomes) {
            summary.record(file.clone(), outcome);
        }
        Ok(summary)
    }
}

fn invoke<R: ToolRunner>(runner: &R, file: &Path) -> InvocationOutcome {
    println!("{}", file.display());
    println!("Calling decompression tool -> {}", runner.describe(file));

    let outcome = runner.run(file);
    if outcome.is_success() {
        println!("Decompressed: {}", file.display());
    } else {
        tracing::warn!(file = %file.display(), %outcome, "Decompression failed");
        eprintln!("Error on {}: {}", file.display(), outcome);
    }
    outcome
}

/// Final console report: successes, attempts and every failed file.
pub fn print_summary(summary: &BatchSummary) {
    println!();
    println!(
        "Number of Images Decompressed to LJPEG1 -> {}",
        summary.succeeded.len()
    );
    println!("Invocations attempted -> {}", summary.attempted);
    if !summary.all_succeeded() {
        println!("Failed invocations -> {}", summary.failed.len());
        for failure in &summary.failed {
            println!("  {}: {}", failure.path.display(), failure.outcome);
        }
    }
    println!("End of program");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Records every call and fails the files it was told to.
    #[derive(Default)]
    struct ScriptedRunner {
        failing: HashSet<PathBuf>,
        calls: Mutex<Vec<PathBuf>>,
    }

    impl ToolRunner for ScriptedRunner {
        fn run(&self, file: &Path) -> InvocationOutcome {
            self.calls.lock().unwrap().push(file.to_path_buf());
            if self.failing.contains(file) {
                InvocationOutcome::Failed { code: 1 }
            } else {
                InvocationOutcome::Succeeded
            }
        }

        fn describe(&self, file: &Path) -> String {
            format!("scripted {}", file.display())
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from("/data").join(n)).collect()
    }

    #[test]
    fn sequential_run_invokes_once_per_file_in_order() {
        let files = paths(&["a.ljpeg", "b.LJPEG", "c.ljpeg"]);
        let runner = ScriptedRunner::default();

        let summary = BatchInvoker::default()
            .process_files(&files, &runner)
            .expect("batch");

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.succeeded, files);
        assert!(summary.all_succeeded());
        assert_eq!(*runner.calls.lock().unwrap(), files);
    }

    #[test]
    fn failures_are_counted_but_never_stop_the_loop() {
        let files = paths(&["a.ljpeg", "b.ljpeg", "c.ljpeg", "d.ljpeg"]);
        let runner = ScriptedRunner {
            failing: HashSet::from([files[1].clone(), files[3].clone()]),
            ..Default::default()
        };

        let summary = BatchInvoker::default()
            .process_files(&files, &runner)
            .expect("batch");

        assert_eq!(summary.attempted, 4);
        assert_eq!(runner.calls.lock().unwrap().len(), 4);
        assert_eq!(summary.succeeded, vec![files[0].clone(), files[2].clone()]);
        let failed: Vec<_> = summary.failed.iter().map(|f| f.path.clone()).collect();
        assert_eq!(failed, vec![files[1].clone(), files[3].clone()]);
    }

    #[test]
    fn empty_list_means_no_invocations() {
        let runner = ScriptedRunner::default();
        let summary = BatchInvoker::new(4)
            .process_files(&[], &runner)
            .expect("batch");

        assert_eq!(summary, BatchSummary::default());
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn parallel_run_matches_sequential_summary() {
        let files: Vec<PathBuf> = (0..32)
            .map(|i| PathBuf::from(format!("/data/img_{i:02}.LJPEG")))
            .collect();
        let failing: HashSet<PathBuf> = files.iter().step_by(5).cloned().collect();

        let sequential = ScriptedRunner {
            failing: failing.clone(),
            ..Default::default()
        };
        let parallel = ScriptedRunner {
            failing,
            ..Default::default()
        };

        let expected = BatchInvoker::new(1)
            .process_files(&files, &sequential)
            .expect("sequential");
        let actual = BatchInvoker::new(4)
            .process_files(&files, &parallel)
            .expect("parallel");

        assert_eq!(actual, expected);
        assert_eq!(parallel.calls.lock().unwrap().len(), files.len());
    }

    #[test]
    fn zero_jobs_falls_back_to_sequential() {
        let files = paths(&["a.ljpeg"]);
        let runner = ScriptedRunner::default();
        let summary = BatchInvoker::new(0)
            .process_files(&files, &runner)
            .expect("batch");
        assert_eq!(summary.attempted, 1);
    }
}
