//
// scan.rs
// LJPEG-Tools-rs
//
// Lists the files of a directory and keeps the ones whose extension is in the allow-list.
//
// Thales Matheus Mendonça Santos - October 2026

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::config::AllowedExtensions;
use crate::error::ScanError;
use crate::models::{FileEntry, ScanResult};

/// Finds candidate LJPEG files. Non-recursive unless asked otherwise.
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner {
    extensions: AllowedExtensions,
    recursive: bool,
}

impl DirectoryScanner {
    pub fn new(extensions: AllowedExtensions) -> Self {
        Self {
            extensions,
            recursive: false,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Scan `dir`, returning matched and skipped paths in filesystem order.
    ///
    /// Only a root that is missing, not a directory, or unreadable is an error; unreadable
    /// subdirectories in recursive mode are logged and skipped.
    pub fn scan_directory(&self, dir: &Path) -> Result<ScanResult, ScanError> {
        tracing::info!(directory = %dir.display(), "Opening directory");

        let metadata = fs::metadata(dir).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(dir.to_path_buf()),
            _ => ScanError::Unreadable {
                path: dir.to_path_buf(),
                source: err,
            },
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(dir.to_path_buf()));
        }
        // Probe the handle up front so permission problems surface as a scan failure.
        drop(fs::read_dir(dir).map_err(|source| ScanError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?);

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut result = ScanResult::default();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(max_depth) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    let message = err.to_string();
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
                    return Err(ScanError::Unreadable {
                        path: dir.to_path_buf(),
                        source,
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            // Ignore (sub-)directories; symlinks are not followed and count as files.
            if entry.file_type().is_dir() {
                continue;
            }

            let file = FileEntry::from_name(entry.file_name().to_string_lossy());
            if file.matches(&self.extensions) {
                tracing::info!(file = %file.name, "Found matching data file");
                result.matches.push(entry.into_path());
            } else {
                tracing::info!(
                    file = %file.name,
                    "Found file does not match required file type, skipping"
                );
                result.skipped.push(entry.into_path());
            }
        }

        tracing::info!(
            directory = %dir.display(),
            matched = result.matches.len(),
            skipped = result.skipped.len(),
            "Directory scan finished"
        );
        Ok(result)
    }

    /// Like [`scan_directory`](Self::scan_directory), but an unusable directory is
    /// reported and treated as empty.
    pub fn scan(&self, dir: &Path) -> ScanResult {
        self.scan_directory(dir).unwrap_or_else(|err| {
            tracing::error!(error = %err, "Error opening directory");
            ScanResult::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"").expect("write fixture");
        path
    }

    fn as_set(paths: &[PathBuf]) -> BTreeSet<PathBuf> {
        paths.iter().cloned().collect()
    }

    #[test]
    fn matches_extension_case_insensitively() {
        let dir = tempdir().expect("tmpdir");
        let a = touch(dir.path(), "a.ljpeg");
        let b = touch(dir.path(), "b.LJPEG");
        let c = touch(dir.path(), "c.png");

        let result = DirectoryScanner::default()
            .scan_directory(dir.path())
            .expect("scan");

        assert_eq!(as_set(&result.matches), BTreeSet::from([a, b]));
        assert_eq!(result.skipped, vec![c]);
    }

    #[test]
    fn files_without_extension_are_skipped() {
        let dir = tempdir().expect("tmpdir");
        touch(dir.path(), "noext");
        touch(dir.path(), "ljpeg");

        let result = DirectoryScanner::default().scan(dir.path());
        assert!(result.matches.is_empty());
        assert_eq!(result.skipped.len(), 2);
    }

    #[test]
    fn subdirectories_are_ignored_even_with_matching_names() {
        let dir = tempdir().expect("tmpdir");
        fs::create_dir(dir.path().join("case_0001.ljpeg")).expect("mkdir");
        touch(&dir.path().join("case_0001.ljpeg"), "nested.LJPEG");
        let top = touch(dir.path(), "top.ljpeg");

        let result = DirectoryScanner::default().scan(dir.path());
        assert_eq!(result.matches, vec![top]);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn recursive_scan_descends_into_case_directories() {
        let dir = tempdir().expect("tmpdir");
        let case = dir.path().join("benign_01").join("case0029");
        fs::create_dir_all(&case).expect("mkdir");
        let nested = touch(&case, "C_0029_1.LEFT_CC.LJPEG");
        let top = touch(dir.path(), "top.ljpeg");
        touch(&case, "C_0029_1.ics");

        let result = DirectoryScanner::default()
            .recursive(true)
            .scan_directory(dir.path())
            .expect("scan");
        assert_eq!(as_set(&result.matches), BTreeSet::from([nested, top]));
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn custom_allow_list_is_respected() {
        let dir = tempdir().expect("tmpdir");
        let ljpeg1 = touch(dir.path(), "a.LJPEG.1");
        touch(dir.path(), "a.LJPEG");

        let exts = AllowedExtensions::new(["1"]).expect("exts");
        let result = DirectoryScanner::new(exts).scan(dir.path());
        assert_eq!(result.matches, vec![ljpeg1]);
    }

    #[test]
    fn missing_directory_is_an_error_and_yields_nothing() {
        let dir = tempdir().expect("tmpdir");
        let missing = dir.path().join("does-not-exist");

        let scanner = DirectoryScanner::default();
        assert!(matches!(
            scanner.scan_directory(&missing),
            Err(ScanError::NotFound(_))
        ));
        assert!(scanner.scan(&missing).matches.is_empty());
    }

    #[test]
    fn regular_file_is_not_a_directory() {
        let dir = tempdir().expect("tmpdir");
        let file = touch(dir.path(), "a.ljpeg");

        assert!(matches!(
            DirectoryScanner::default().scan_directory(&file),
            Err(ScanError::NotADirectory(_))
        ));
    }

    #[test]
    fn repeated_scans_return_the_same_set() {
        let dir = tempdir().expect("tmpdir");
        for name in ["x.ljpeg", "y.LJPEG", "z.Ljpeg", "notes.txt"] {
            touch(dir.path(), name);
        }

        let scanner = DirectoryScanner::default();
        let first = scanner.scan(dir.path());
        let second = scanner.scan(dir.path());
        assert_eq!(first.matches.len(), 3);
        assert_eq!(as_set(&first.matches), as_set(&second.matches));
    }
}
