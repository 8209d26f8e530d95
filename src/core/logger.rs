//! Main logger implementation

use super::{
    dispatch::dispatch,
    error::Result,
    handler::{DispatchRecord, Handler},
    metrics::LoggerMetrics,
    record::LogRecord,
    render,
    severity::{self, Severity},
    sink::Sink,
    value::Value,
};
use crate::handlers::{FileHandler, FileOptions};
use crate::sinks::ConsoleSink;
use parking_lot::RwLock;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt::Write as _;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::Arc;

pub struct Logger {
    name: Option<String>,
    threshold: RwLock<Severity>,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
    sink: Arc<dyn Sink>,
    /// Counters for suppressed calls and swallowed failures
    metrics: LoggerMetrics,
}

impl Logger {
    /// Unnamed logger writing to the console at `DEBUG` and above
    #[must_use]
    pub fn new() -> Self {
        Self::with_sink(Arc::new(ConsoleSink::new()))
    }

    #[must_use]
    pub fn with_sink(sink: Arc<dyn Sink>) -> Self {
        Self {
            name: None,
            threshold: RwLock::new(Severity::default()),
            handlers: RwLock::new(Vec::new()),
            sink,
            metrics: LoggerMetrics::new(),
        }
    }

    pub(crate) fn named(name: impl Into<String>, threshold: Severity, sink: Arc<dyn Sink>) -> Self {
        let mut logger = Self::with_sink(sink);
        logger.name = Some(name.into());
        *logger.threshold.get_mut() = threshold;
        logger
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn threshold(&self) -> Severity {
        *self.threshold.read()
    }

    pub fn set_threshold(&self, level: Severity) {
        *self.threshold.write() = level;
    }

    pub fn is_enabled(&self, level: Severity) -> bool {
        level.enabled(self.threshold())
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Append a closure handler; no de-duplication is performed
    pub fn add_handler<F>(&self, handler: F)
    where
        F: Fn(&DispatchRecord<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.attach(Arc::new(handler));
    }

    /// Append an already shared handler
    pub fn attach(&self, handler: Arc<dyn Handler>) {
        self.handlers.write().push(handler);
    }

    /// Append every formatted message to `path`
    pub fn add_file(&self, path: impl Into<PathBuf>) {
        self.add_file_with(path, FileOptions::default());
    }

    /// Like [`Logger::add_file`]; rotation and retention are accepted but not applied
    pub fn add_file_with(&self, path: impl Into<PathBuf>, options: FileOptions) {
        self.attach(Arc::new(FileHandler::with_options(path, options)));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use pretty_logger_system::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let logger = Logger::builder()
    ///     .threshold(Severity::Warning)
    ///     .sink(Arc::new(BufferSink::new()))
    ///     .build();
    ///
    /// logger.info("filtered");
    /// logger.error("kept");
    ///
    /// assert_eq!(logger.metrics().suppressed(), 1);
    /// assert_eq!(logger.metrics().emitted(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    /// Log `parts` at `level`.
    ///
    /// Calls below the threshold return before any rendering or dispatch.
    #[track_caller]
    pub fn log(&self, level: Severity, parts: Vec<Value>) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }
        self.emit(LogRecord::new(level, parts), Location::caller());
    }

    /// Log with a level given by name. Unknown names are never filtered.
    #[track_caller]
    pub fn log_named(&self, level: &str, parts: Vec<Value>) {
        if !severity::name_enabled(level, self.threshold().priority()) {
            self.metrics.record_suppressed();
            return;
        }
        self.emit(LogRecord::named(level, parts), Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<Value>) {
        self.log(Severity::Debug, vec![message.into()]);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<Value>) {
        self.log(Severity::Info, vec![message.into()]);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl Into<Value>) {
        self.log(Severity::Warning, vec![message.into()]);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<Value>) {
        self.log(Severity::Error, vec![message.into()]);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl Into<Value>) {
        self.log(Severity::Critical, vec![message.into()]);
    }

    /// Log an error at `ERROR` together with its source chain (and a
    /// backtrace when `RUST_BACKTRACE` enables capture).
    ///
    /// `parts` are collapsed into one message with the usual join rule.
    #[track_caller]
    pub fn exception(&self, error: &(dyn StdError + 'static), parts: Vec<Value>) {
        if !self.is_enabled(Severity::Error) {
            self.metrics.record_suppressed();
            return;
        }
        let traceback = error_traceback(error, &Backtrace::capture());
        self.emit_exception(parts, traceback, Location::caller());
    }

    /// Exception-style entry with a pre-built traceback
    #[track_caller]
    pub(crate) fn exception_with_traceback(&self, parts: Vec<Value>, traceback: String) {
        if !self.is_enabled(Severity::Error) {
            self.metrics.record_suppressed();
            return;
        }
        self.emit_exception(parts, traceback, Location::caller());
    }

    /// Render `value` explicitly as a block, optionally inside a titled box
    pub fn json(&self, value: impl Into<Value>, title: Option<&str>, level: Severity) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }
        self.metrics.record_emitted();

        let value = value.into();
        let colorize = self.sink.colorize();
        let body = if colorize {
            render::render_colored(&value, title)
        } else {
            render::render_structured(&value, title)
        };

        let parts = match title {
            Some(title) => vec![Value::Str(format!("[{}]", title)), value],
            None => vec![value],
        };
        let record = LogRecord::new(level, parts);

        let text = format!("{}\n{}", record.console_header(colorize).trim_end(), body);
        self.write_sink(record.severity, &text);
        self.dispatch(&record);
    }

    fn emit(&self, record: LogRecord, location: &Location<'_>) {
        self.metrics.record_emitted();

        let colorize = self.sink.colorize();
        let text = if record.has_structured() {
            record.console_structured(colorize)
        } else {
            record.console_plain(location, colorize)
        };
        self.write_sink(record.severity, &text);
        self.dispatch(&record);
    }

    fn emit_exception(&self, parts: Vec<Value>, traceback: String, location: &Location<'_>) {
        self.metrics.record_emitted();

        let formatted = render::format_parts(&parts);
        let record =
            LogRecord::new(Severity::Error, vec![Value::Str(formatted)]).with_traceback(traceback);

        let text = record.console_plain(location, self.sink.colorize());
        self.write_sink(record.severity, &text);
        self.dispatch(&record);
    }

    fn write_sink(&self, severity: Option<Severity>, text: &str) {
        if let Err(e) = self.sink.write(severity, text) {
            self.metrics.record_sink_failure();
            eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", self.sink.name(), e);
        }
    }

    fn dispatch(&self, record: &LogRecord) {
        // Snapshot so handlers may register handlers without deadlocking
        let handlers: Vec<Arc<dyn Handler>> = self.handlers.read().clone();
        dispatch(&handlers, record, &self.metrics);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("threshold", &self.threshold())
            .field("handlers", &self.handler_count())
            .field("sink", &self.sink.name())
            .finish()
    }
}

/// `Error: <msg>` followed by the `Caused by:` chain and a captured backtrace
pub(crate) fn error_traceback(error: &(dyn StdError + 'static), backtrace: &Backtrace) -> String {
    let mut out = format!("Error: {}", error);
    let mut source = error.source();
    if source.is_some() {
        out.push_str("\n\nCaused by:");
    }
    let mut idx = 0;
    while let Some(cause) = source {
        let _ = write!(out, "\n    {}: {}", idx, cause);
        source = cause.source();
        idx += 1;
    }
    append_backtrace(&mut out, backtrace);
    out
}

pub(crate) fn append_backtrace(out: &mut String, backtrace: &Backtrace) {
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(out, "\n\nStack backtrace:\n{}", backtrace);
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use pretty_logger_system::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .name("server")
///     .threshold(Severity::Info)
///     .sink(Arc::new(ConsoleSink::with_colors(false)))
///     .handler(|record: &DispatchRecord<'_>| {
///         assert!(record.message.ends_with('\n'));
///         Ok(())
///     })
///     .build();
///
/// logger.info("Server started");
/// ```
pub struct LoggerBuilder {
    name: Option<String>,
    threshold: Severity,
    sink: Option<Arc<dyn Sink>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: None,
            threshold: Severity::default(),
            sink: None,
            handlers: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: Severity) -> Self {
        self.threshold = level;
        self
    }

    /// Set the live output sink. Defaults to a colored [`ConsoleSink`].
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Add a closure handler
    #[must_use = "builder methods return a new value"]
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&DispatchRecord<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Add a shared handler
    #[must_use = "builder methods return a new value"]
    pub fn attach(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Add a file handler
    #[must_use = "builder methods return a new value"]
    pub fn file(self, path: impl Into<PathBuf>, options: FileOptions) -> Self {
        self.attach(Arc::new(FileHandler::with_options(path, options)))
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(ConsoleSink::new()) as Arc<dyn Sink>);
        let mut logger = Logger::with_sink(sink);
        logger.name = self.name;
        *logger.threshold.get_mut() = self.threshold;
        *logger.handlers.get_mut() = self.handlers;
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
