//! Fan-out of finished records to registered handlers
//!
//! **Per-Handler Isolation**: each handler call is guarded separately. An
//! `Err` result or a panic is reported on stderr and counted, and the
//! remaining handlers still receive the record. Nothing reaches the caller.

use super::{
    handler::{DispatchRecord, Handler},
    metrics::LoggerMetrics,
    record::LogRecord,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Deliver `record` to every handler in registration order.
///
/// Returns the number of handlers that failed.
pub fn dispatch(
    handlers: &[Arc<dyn Handler>],
    record: &LogRecord,
    metrics: &LoggerMetrics,
) -> usize {
    if handlers.is_empty() {
        return 0;
    }

    let message = record.handler_message();
    let view = DispatchRecord {
        timestamp: record.timestamp,
        level: &record.label,
        severity: record.severity,
        message: &message,
        parts: &record.parts,
        traceback: record.traceback.as_deref(),
    };

    metrics.record_dispatched();

    let mut failures = 0;
    for (idx, handler) in handlers.iter().enumerate() {
        if !guarded_call(idx, handler.as_ref(), &view) {
            metrics.record_handler_failure();
            failures += 1;
        }
    }
    failures
}

fn guarded_call(idx: usize, handler: &dyn Handler, record: &DispatchRecord<'_>) -> bool {
    let result = catch_unwind(AssertUnwindSafe(|| handler.handle(record)));

    match result {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            eprintln!(
                "[LOGGER ERROR] Handler #{} ({}) failed: {}",
                idx,
                handler.name(),
                e
            );
            false
        }
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!(
                "[LOGGER CRITICAL] Handler #{} ({}) panicked: {}. \
                 Other handlers continue to function.",
                idx,
                handler.name(),
                panic_msg
            );
            false
        }
    }
}
