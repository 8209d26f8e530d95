//! Logger configuration loaded from JSON

use super::error::{LoggerError, Result};
use super::logger::{Logger, LoggerBuilder};
use super::severity::Severity;
use crate::handlers::FileOptions;
use crate::sinks::ConsoleSink;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Declarative logger setup
///
/// # Example
///
/// ```
/// use pretty_logger_system::prelude::*;
///
/// let config = LoggerConfig::from_json(r#"{
///     "name": "worker",
///     "level": "warning",
///     "colors": false
/// }"#).unwrap();
///
/// let logger = config.build().unwrap();
/// assert_eq!(logger.threshold(), Severity::Warning);
/// assert_eq!(logger.name(), Some("worker"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: Option<String>,
    /// Threshold name, case-insensitive; `DEBUG` when absent
    pub level: Option<String>,
    /// Colorize console output
    pub colors: bool,
    pub files: Vec<FileConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub rotation: Option<String>,
    #[serde(default)]
    pub retention: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: None,
            level: None,
            colors: true,
            files: Vec::new(),
        }
    }
}

impl LoggerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))
    }

    /// The configured threshold
    pub fn threshold(&self) -> Result<Severity> {
        match self.level.as_deref() {
            None => Ok(Severity::default()),
            Some(level) => level
                .parse()
                .map_err(|e: String| LoggerError::config("level", e)),
        }
    }

    /// A builder with every configured setting applied
    pub fn builder(&self) -> Result<LoggerBuilder> {
        let mut builder = Logger::builder()
            .threshold(self.threshold()?)
            .sink(Arc::new(ConsoleSink::with_colors(self.colors)));

        if let Some(ref name) = self.name {
            builder = builder.name(name.clone());
        }
        for file in &self.files {
            let options = FileOptions {
                rotation: file.rotation.clone(),
                retention: file.retention.clone(),
            };
            builder = builder.file(file.path.clone(), options);
        }
        Ok(builder)
    }

    pub fn build(&self) -> Result<Logger> {
        Ok(self.builder()?.build())
    }
}
