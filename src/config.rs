//
// config.rs
// LJPEG-Tools-rs
//
// Run configuration passed from the CLI down to the scanner and the batch invoker.
//
// Thales Matheus Mendonça Santos - October 2026

use std::path::PathBuf;

use serde::Serialize;

use crate::error::ConfigError;

/// Extension of the DDSM lossless JPEG files.
pub const DEFAULT_EXTENSION: &str = "ljpeg";

/// The decompression utility shipped with the DDSM software, looked up relative to the working directory.
pub const DEFAULT_TOOL: &str = "./jpeg";

/// Ordered, de-duplicated set of lowercase extensions (without the leading dot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedExtensions(Vec<String>);

impl AllowedExtensions {
    pub fn new<I, S>(extensions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for raw in extensions {
            let ext = normalize_extension(raw.as_ref())?;
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        if normalized.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        Ok(Self(normalized))
    }

    /// `extension` must already be case-folded, as produced by `FileEntry`.
    pub fn contains(&self, extension: &str) -> bool {
        self.0.iter().any(|allowed| allowed == extension)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for AllowedExtensions {
    fn default() -> Self {
        Self(vec![DEFAULT_EXTENSION.to_string()])
    }
}

fn normalize_extension(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let ext = trimmed.strip_prefix('.').unwrap_or(trimmed).to_lowercase();
    // The extension is whatever follows the last dot, so a dot inside it could never match.
    if ext.is_empty() || ext.contains(['.', '/', '\\']) {
        return Err(ConfigError::InvalidExtension(raw.to_string()));
    }
    Ok(ext)
}

/// Everything a single run needs; built once from the command line.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub directory: PathBuf,
    pub extensions: AllowedExtensions,
    pub tool: PathBuf,
    pub jobs: usize,
    pub recursive: bool,
    pub report: Option<PathBuf>,
}

impl BatchConfig {
    /// Sequential run over `directory` with the default extension and tool.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extensions: AllowedExtensions::default(),
            tool: PathBuf::from(DEFAULT_TOOL),
            jobs: 1,
            recursive: false,
            report: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jobs == 0 {
            return Err(ConfigError::ZeroJobs);
        }
        Ok(())
    }
}
