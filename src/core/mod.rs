//! Core logger types and traits

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod render;
pub mod severity;
pub mod sink;
pub mod value;

pub use config::{FileConfig, LoggerConfig};
pub use dispatch::dispatch;
pub use error::{LoggerError, Result};
pub use handler::{DispatchRecord, Handler, OwnedRecord};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use record::{LogRecord, TIMESTAMP_FORMAT};
pub use registry::{get_logger, get_logger_with_level, LoggerRegistry};
pub use render::{format_parts, render_colored, render_structured};
pub use severity::Severity;
pub use sink::Sink;
pub use value::Value;
