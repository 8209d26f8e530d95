//! Logging macros taking any number of message parts.
//!
//! Each argument is converted with [`Value::from`](crate::Value) and kept as
//! its own part, so structured arguments are rendered as blocks while
//! scalars are joined with spaces.
//!
//! # Examples
//!
//! ```
//! use pretty_logger_system::prelude::*;
//! use pretty_logger_system::info;
//! use std::sync::Arc;
//!
//! let logger = Logger::builder().sink(Arc::new(BufferSink::new())).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // Several parts
//! let port = 8080;
//! info!(logger, "Server listening on port", port);
//!
//! // Structured parts
//! info!(logger, "ready:", vec!["db", "cache"]);
//! ```

/// Log parts at an explicit severity.
///
/// # Examples
///
/// ```
/// # use pretty_logger_system::prelude::*;
/// # let logger = Logger::builder().sink(std::sync::Arc::new(BufferSink::new())).build();
/// use pretty_logger_system::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code:", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:expr),+ $(,)?) => {
        $logger.log($level, vec![$($crate::Value::from($arg)),+])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use pretty_logger_system::prelude::*;
/// # let logger = Logger::builder().sink(std::sync::Arc::new(BufferSink::new())).build();
/// use pretty_logger_system::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value:", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg),+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg),+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use pretty_logger_system::prelude::*;
/// # let logger = Logger::builder().sink(std::sync::Arc::new(BufferSink::new())).build();
/// use pretty_logger_system::warning;
/// warning!(logger, "Low disk space");
/// warning!(logger, "Retry attempt", 3, "of", 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg),+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg),+)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use pretty_logger_system::prelude::*;
/// # let logger = Logger::builder().sink(std::sync::Arc::new(BufferSink::new())).build();
/// use pretty_logger_system::critical;
/// critical!(logger, "Unable to recover from error:", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::Severity::Critical, $($arg),+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Logger, Severity, Value};
    use crate::sinks::BufferSink;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn logger() -> (Logger, Arc<BufferSink>) {
        let sink = Arc::new(BufferSink::new());
        (Logger::builder().sink(sink.clone()).build(), sink)
    }

    #[test]
    fn test_log_macro() {
        let (logger, sink) = logger();
        log!(logger, Severity::Info, "Test message");
        log!(logger, Severity::Info, "Formatted:", 42);
        assert!(sink.messages()[1].ends_with(" - Formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = logger();
        debug!(logger, "Debug message");
        info!(logger, "Items:", 100);
        warning!(logger, "Retry", 1, "of", 3);
        error!(logger, "Code:", 500,);
        critical!(logger, "down");

        let levels: Vec<_> = sink.entries().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            levels,
            Severity::ALL.iter().copied().map(Some).collect::<Vec<_>>()
        );
        assert!(sink.messages()[2].ends_with(" - Retry 1 of 3"));
    }

    #[test]
    fn test_macro_reports_call_site() {
        let (logger, sink) = logger();
        info!(logger, "here");
        assert!(sink.messages()[0].contains("macros.rs:"));
    }

    #[test]
    fn test_structured_argument_keeps_shape() {
        let (logger, _sink) = logger();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        logger.add_handler(move |r| {
            s.lock().extend(r.parts.iter().cloned());
            Ok(())
        });

        let mut config = BTreeMap::new();
        config.insert("retries", 3);
        info!(logger, "config:", config);

        assert_eq!(
            *seen.lock(),
            vec![Value::from("config:"), Value::map([("retries", 3)])]
        );
    }
}
