//! File handler implementation

use crate::core::{DispatchRecord, Handler, LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Rotation and retention settings for a file handler.
///
/// Both are accepted and kept for inspection but have no effect: the file
/// only ever grows by appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOptions {
    /// e.g. `"1 day"`, `"10 MB"`
    pub rotation: Option<String>,
    /// e.g. `"7 days"`
    pub retention: Option<String>,
}

impl FileOptions {
    #[must_use]
    pub fn rotation(mut self, rotation: impl Into<String>) -> Self {
        self.rotation = Some(rotation.into());
        self
    }

    #[must_use]
    pub fn retention(mut self, retention: impl Into<String>) -> Self {
        self.retention = Some(retention.into());
        self
    }
}

/// Appends each formatted message to a file.
///
/// The file is opened in append mode, written and closed on every record; no
/// handle is held between calls. Write failures never reach the logger: they
/// are reported on stderr, counted and dropped.
pub struct FileHandler {
    path: PathBuf,
    options: FileOptions,
    failures: AtomicU64,
}

impl FileHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, FileOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: FileOptions) -> Self {
        Self {
            path: path.into(),
            options,
            failures: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &FileOptions {
        &self.options
    }

    /// Number of appends that failed and were dropped
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Append `message` as-is, reporting any I/O error
    pub fn try_append(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", self.path.display()),
                    e,
                )
            })?;
        file.write_all(message.as_bytes())?;
        Ok(())
    }
}

impl Handler for FileHandler {
    fn handle(&self, record: &DispatchRecord<'_>) -> Result<()> {
        if let Err(e) = self.try_append(record.message) {
            self.failures.fetch_add(1, Ordering::Relaxed);
            eprintln!("[LOGGER WARNING] File handler dropped a record: {}", e);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
