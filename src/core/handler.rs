//! Handler trait for side-channel log consumers

use super::{error::Result, severity::Severity, value::Value};
use chrono::{DateTime, Local};

/// A dispatched log record as seen by a handler.
///
/// `message` is the fully formatted line (timestamp, level, body and an
/// optional traceback, terminated by `\n`); `parts` are the raw arguments of
/// the call in their original order.
#[derive(Debug, Clone, Copy)]
pub struct DispatchRecord<'a> {
    pub timestamp: DateTime<Local>,
    /// Upper-case level label, e.g. `"INFO"`
    pub level: &'a str,
    /// `None` when the call used a level name outside the known set
    pub severity: Option<Severity>,
    pub message: &'a str,
    pub parts: &'a [Value],
    pub traceback: Option<&'a str>,
}

impl DispatchRecord<'_> {
    pub fn to_owned_record(&self) -> OwnedRecord {
        OwnedRecord {
            timestamp: self.timestamp,
            level: self.level.to_string(),
            severity: self.severity,
            message: self.message.to_string(),
            parts: self.parts.to_vec(),
            traceback: self.traceback.map(str::to_string),
        }
    }
}

/// Owned copy of a [`DispatchRecord`], for handlers that keep records around
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedRecord {
    pub timestamp: DateTime<Local>,
    pub level: String,
    pub severity: Option<Severity>,
    pub message: String,
    pub parts: Vec<Value>,
    pub traceback: Option<String>,
}

pub trait Handler: Send + Sync {
    fn handle(&self, record: &DispatchRecord<'_>) -> Result<()>;

    fn name(&self) -> &str {
        "handler"
    }
}

impl<F> Handler for F
where
    F: Fn(&DispatchRecord<'_>) -> Result<()> + Send + Sync,
{
    fn handle(&self, record: &DispatchRecord<'_>) -> Result<()> {
        self(record)
    }
}
