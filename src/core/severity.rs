//! Severity levels and threshold checks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Fixed numeric priority; ordering between levels is defined by this value only.
    #[inline]
    pub const fn priority(self) -> u8 {
        match self {
            Severity::Debug => 10,
            Severity::Info => 20,
            Severity::Warning => 30,
            Severity::Error => 40,
            Severity::Critical => 50,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Debug => BrightBlack,
            Severity::Info => Green,
            Severity::Warning => Yellow,
            Severity::Error => Red,
            Severity::Critical => BrightRed,
        }
    }

    /// Whether a call at this level passes `threshold`
    #[inline]
    pub fn enabled(self, threshold: Severity) -> bool {
        enabled(self.priority(), threshold.priority())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" | "FATAL" => Ok(Severity::Critical),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Priority of a level given by name. Unknown names map to `0`.
pub fn priority_of(name: &str) -> u8 {
    name.parse::<Severity>().map(Severity::priority).unwrap_or(0)
}

#[inline]
pub fn enabled(priority: u8, threshold: u8) -> bool {
    priority >= threshold
}

/// Threshold check for a level given by name.
///
/// Unknown names are never filtered, whatever the threshold.
pub fn name_enabled(name: &str, threshold: u8) -> bool {
    match priority_of(name) {
        0 => true,
        priority => enabled(priority, threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities() {
        let priorities: Vec<u8> = Severity::ALL.iter().map(|s| s.priority()).collect();
        assert_eq!(priorities, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_ordering_follows_priority() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Critical > Severity::Error);
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Critical));
    }

    #[test]
    fn test_priority_of_names() {
        assert_eq!(priority_of("info"), 20);
        assert_eq!(priority_of("WARN"), 30);
        assert_eq!(priority_of("fatal"), 50);
        assert_eq!(priority_of("verbose"), 0);
        assert_eq!(priority_of(""), 0);
    }

    #[test]
    fn test_unknown_name_always_enabled() {
        for threshold in Severity::ALL {
            assert!(name_enabled("shout", threshold.priority()));
        }
        assert!(!name_enabled("debug", Severity::Info.priority()));
        assert!(name_enabled("error", Severity::Info.priority()));
    }

    #[test]
    fn test_enabled() {
        assert!(Severity::Warning.enabled(Severity::Info));
        assert!(Severity::Info.enabled(Severity::Info));
        assert!(!Severity::Debug.enabled(Severity::Info));
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:<8}|", Severity::Info), "INFO    |");
        assert_eq!(format!("{:<8}|", Severity::Critical), "CRITICAL|");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
        let parsed: Severity = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(parsed, Severity::Error);
    }
}
