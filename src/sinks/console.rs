//! Console sink implementation

use crate::core::{Result, Severity, Sink};
use std::io::Write;

/// Writes every message to stderr, colored unless disabled
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, _severity: Option<Severity>, text: &str) -> Result<()> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');

        // One write on a locked handle keeps concurrent messages whole
        std::io::stderr().lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn colorize(&self) -> bool {
        self.use_colors
    }

    fn name(&self) -> &str {
        "console"
    }
}
