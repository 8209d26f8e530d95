//! In-memory sink, mostly useful for tests and for capturing console output

use crate::core::{Result, Severity, Sink};
use parking_lot::Mutex;

/// Keeps every written message in memory. Never colorizes unless built with
/// [`BufferSink::colored`].
#[derive(Debug, Default)]
pub struct BufferSink {
    entries: Mutex<Vec<(Option<Severity>, String)>>,
    use_colors: bool,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colored() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            use_colors: true,
        }
    }

    /// Written messages in write order
    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn entries(&self) -> Vec<(Option<Severity>, String)> {
        self.entries.lock().clone()
    }

    /// Everything written so far, one message per line
    pub fn contents(&self) -> String {
        let entries = self.entries.lock();
        let mut out = String::new();
        for (_, message) in entries.iter() {
            out.push_str(message);
            out.push('\n');
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Sink for BufferSink {
    fn write(&self, severity: Option<Severity>, text: &str) -> Result<()> {
        self.entries.lock().push((severity, text.to_string()));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn colorize(&self) -> bool {
        self.use_colors
    }

    fn name(&self) -> &str {
        "buffer"
    }
}
