//! Named logger registry
//!
//! Maps names to shared loggers so that every part of a program asking for
//! the same name writes through the same instance.

use super::logger::Logger;
use super::severity::Severity;
use super::sink::Sink;
use crate::sinks::ConsoleSink;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub struct LoggerRegistry {
    sink: Arc<dyn Sink>,
    default_logger: Arc<Logger>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    /// Registry whose loggers write to the console
    pub fn new() -> Self {
        Self::with_sink(Arc::new(ConsoleSink::new()))
    }

    /// Registry whose loggers all share `sink`
    pub fn with_sink(sink: Arc<dyn Sink>) -> Self {
        let default_logger = Arc::new(Logger::with_sink(Arc::clone(&sink)));
        Self {
            sink,
            default_logger,
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// Look up or create the logger for `name`.
    ///
    /// `None` returns the unnamed default logger. `level` only applies when
    /// the named logger is created; later lookups return the existing
    /// instance unchanged.
    pub fn get(&self, name: Option<&str>, level: Severity) -> Arc<Logger> {
        let Some(name) = name else {
            return Arc::clone(&self.default_logger);
        };

        let mut loggers = self.loggers.lock();
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }

        let logger = Arc::new(Logger::named(name, level, Arc::clone(&self.sink)));
        loggers.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    pub fn default_logger(&self) -> Arc<Logger> {
        Arc::clone(&self.default_logger)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of named loggers (the default logger is not counted)
    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<LoggerRegistry> = OnceLock::new();

/// The process-wide registry, created on first use
pub fn global() -> &'static LoggerRegistry {
    GLOBAL_REGISTRY.get_or_init(LoggerRegistry::new)
}

/// Get a logger from the process-wide registry; new loggers start at `DEBUG`
pub fn get_logger(name: Option<&str>) -> Arc<Logger> {
    global().get(name, Severity::Debug)
}

/// Like [`get_logger`], with the threshold used if the logger is created now
pub fn get_logger_with_level(name: Option<&str>, level: Severity) -> Arc<Logger> {
    global().get(name, level)
}
