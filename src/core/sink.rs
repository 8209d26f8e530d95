//! Sink trait for the primary, level-filtered text output

use super::{error::Result, severity::Severity};

pub trait Sink: Send + Sync {
    /// Write one complete message; implementations must not interleave it
    /// with concurrent writes.
    fn write(&self, severity: Option<Severity>, text: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    /// Whether text for this sink should carry terminal colors
    fn colorize(&self) -> bool;
    fn name(&self) -> &str;
}
