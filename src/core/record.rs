//! Per-call log record and the text layouts built from it

use super::render;
use super::severity::Severity;
use super::value::Value;
use chrono::{DateTime, Local};
use colored::Colorize;
use std::borrow::Cow;
use std::panic::Location;

/// Timestamp layout shared by the console and handler messages
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SEPARATOR: &str = " | ";

/// One log call, captured after it passed the threshold
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub label: Cow<'static, str>,
    pub severity: Option<Severity>,
    pub parts: Vec<Value>,
    pub traceback: Option<String>,
}

impl LogRecord {
    pub fn new(severity: Severity, parts: Vec<Value>) -> Self {
        Self {
            timestamp: Local::now(),
            label: Cow::Borrowed(severity.to_str()),
            severity: Some(severity),
            parts,
            traceback: None,
        }
    }

    /// Record for a level given by name; unknown names keep their upper-cased label
    pub fn named(level: &str, parts: Vec<Value>) -> Self {
        match level.parse::<Severity>() {
            Ok(severity) => Self::new(severity, parts),
            Err(_) => Self {
                timestamp: Local::now(),
                label: Cow::Owned(level.to_uppercase()),
                severity: None,
                parts,
                traceback: None,
            },
        }
    }

    #[must_use]
    pub fn with_traceback(mut self, traceback: impl Into<String>) -> Self {
        self.traceback = Some(traceback.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn has_structured(&self) -> bool {
        self.parts.iter().any(Value::is_structured)
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// The message handed to every handler:
    /// `"<timestamp> | <LEVEL:<8> | <body>\n"`.
    ///
    /// Structured parts are rendered as blocks starting on a new line; a
    /// traceback, if any, is appended after the body on its own line.
    pub fn handler_message(&self) -> String {
        let mut body = self
            .parts
            .iter()
            .map(|part| {
                if part.is_structured() {
                    format!("\n{}", render::render_structured(part, None))
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        if let Some(ref traceback) = self.traceback {
            body.push('\n');
            body.push_str(traceback);
        }

        format!(
            "{}{}{:<8}{}{}\n",
            self.formatted_timestamp(),
            SEPARATOR,
            self.label,
            SEPARATOR,
            body
        )
    }

    /// `"<timestamp> | <LEVEL:<8> | "`, colored when asked
    pub fn console_header(&self, colorize: bool) -> String {
        let timestamp = self.formatted_timestamp();
        let level = format!("{:<8}", self.label);
        if !colorize {
            return format!("{}{}{}{}", timestamp, SEPARATOR, level, SEPARATOR);
        }
        format!(
            "{}{}{}{}",
            timestamp.as_str().green(),
            SEPARATOR.dimmed(),
            self.paint(&level),
            SEPARATOR.dimmed()
        )
    }

    /// Console line for calls without structured parts, attributed to the caller
    pub fn console_plain(&self, location: &Location<'_>, colorize: bool) -> String {
        let message = render::format_parts(&self.parts);
        let origin = format!("{}:{}", location.file(), location.line());
        let mut line = if colorize {
            format!(
                "{}{} - {}",
                self.console_header(true),
                origin.as_str().cyan(),
                self.paint(&message)
            )
        } else {
            format!("{}{} - {}", self.console_header(false), origin, message)
        };
        if let Some(ref traceback) = self.traceback {
            line.push('\n');
            if colorize {
                line.push_str(&traceback.as_str().red().to_string());
            } else {
                line.push_str(traceback);
            }
        }
        line
    }

    /// Console text for calls with structured parts: scalars stay inline,
    /// each structured part gets its own block below the header line.
    pub fn console_structured(&self, colorize: bool) -> String {
        let mut text = self.console_header(colorize);
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            if part.is_structured() {
                text.push('\n');
                if colorize {
                    text.push_str(&render::render_colored(part, None));
                } else {
                    text.push_str(&render::render_structured(part, None));
                }
                text.push('\n');
            } else {
                text.push_str(&part.to_string());
            }
        }
        if self.parts.last().is_some_and(Value::is_structured) {
            text.pop();
        }
        text
    }

    fn paint(&self, text: &str) -> String {
        match self.severity {
            Some(severity) => text.color(severity.color_code()).to_string(),
            None => text.white().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_handler_message_scalars() {
        let record = LogRecord::new(Severity::Info, vec![Value::from("hello"), Value::from(42)])
            .with_timestamp(fixed_time());
        assert_eq!(
            record.handler_message(),
            "2025-01-08 10:30:45 | INFO     | hello 42\n"
        );
    }

    #[test]
    fn test_handler_message_structured() {
        let record = LogRecord::new(
            Severity::Warning,
            vec![Value::from("data:"), Value::list([1, 2])],
        )
        .with_timestamp(fixed_time());
        assert_eq!(
            record.handler_message(),
            "2025-01-08 10:30:45 | WARNING  | data: \n[\n    1,\n    2,\n]\n"
        );
    }

    #[test]
    fn test_handler_message_traceback() {
        let record = LogRecord::new(Severity::Error, vec![Value::from("failed")])
            .with_timestamp(fixed_time())
            .with_traceback("Error: boom");
        assert_eq!(
            record.handler_message(),
            "2025-01-08 10:30:45 | ERROR    | failed\nError: boom\n"
        );
    }

    #[test]
    fn test_named_unknown_level_keeps_label() {
        let record = LogRecord::named("notice", vec![]);
        assert_eq!(record.label, "NOTICE");
        assert!(record.severity.is_none());

        let record = LogRecord::named("warn", vec![]);
        assert_eq!(record.severity, Some(Severity::Warning));
        assert_eq!(record.label, "WARNING");
    }

    #[test]
    fn test_console_plain_layout() {
        let record = LogRecord::new(Severity::Debug, vec![Value::from("a"), Value::from("b")])
            .with_timestamp(fixed_time());
        let location = Location::caller();
        let line = record.console_plain(location, false);
        assert!(line.starts_with("2025-01-08 10:30:45 | DEBUG    | "));
        assert!(line.ends_with(" - a b"));
        assert!(line.contains("record.rs:"));
    }

    #[test]
    fn test_console_structured_layout() {
        let record = LogRecord::new(
            Severity::Info,
            vec![Value::from("user"), Value::map([("id", 7)]), Value::from("done")],
        )
        .with_timestamp(fixed_time());
        assert_eq!(
            record.console_structured(false),
            "2025-01-08 10:30:45 | INFO     | user \n{\n    \"id\": 7,\n}\n done"
        );
    }

    #[test]
    fn test_console_structured_keeps_trailing_scalar_whitespace() {
        let record = LogRecord::new(
            Severity::Info,
            vec![Value::list([1]), Value::from("tail  \n")],
        )
        .with_timestamp(fixed_time());
        assert_eq!(
            record.console_structured(false),
            "2025-01-08 10:30:45 | INFO     | \n[\n    1,\n]\n tail  \n"
        );

        let record =
            LogRecord::new(Severity::Info, vec![Value::list([1])]).with_timestamp(fixed_time());
        assert_eq!(
            record.console_structured(false),
            "2025-01-08 10:30:45 | INFO     | \n[\n    1,\n]"
        );
    }
}
