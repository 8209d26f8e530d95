//! # Pretty Logger System
//!
//! A synchronous logging facade that renders structured arguments (lists,
//! tuples, sets, maps) as readable indented blocks, writes a colored line to
//! the console and fans every message out to registered handlers.
//!
//! ## Features
//!
//! - **Structured Rendering**: Nested values pretty-printed, optionally boxed with a title
//! - **Handlers**: File, channel and network handlers, or any closure
//! - **Named Loggers**: A process-wide registry handing out shared loggers
//! - **Call Tracing**: [`instrument`] logs arguments, results and errors once
//!
//! ## Example
//!
//! ```
//! use pretty_logger_system::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder()
//!     .sink(Arc::new(BufferSink::new()))
//!     .threshold(Severity::Info)
//!     .build();
//!
//! logger.info("service ready");
//! logger.log(
//!     Severity::Warning,
//!     vec!["pool state:".into(), json!({"idle": 2, "busy": 8}).into()],
//! );
//! logger.json(vec![1, 2, 3], Some("batch"), Severity::Info);
//! ```

pub mod core;
pub mod handlers;
pub mod instrument;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        format_parts, get_logger, get_logger_with_level, render_structured, DispatchRecord,
        Handler, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        LoggerRegistry, OwnedRecord, Result, Severity, Sink, Value,
    };
    pub use crate::handlers::{FileHandler, FileOptions};
    pub use crate::instrument::{instrument, Traced};
    pub use crate::sinks::{BufferSink, ConsoleSink};
}

pub use crate::core::{
    format_parts, get_logger, get_logger_with_level, render_colored, render_structured,
    DispatchRecord, Handler, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    LoggerRegistry, OwnedRecord, Result, Severity, Sink, Value,
};
pub use handlers::{ChannelHandler, FileHandler, FileOptions};
pub use instrument::{instrument, Traced};
pub use sinks::{BufferSink, ConsoleSink};
