//! Severity levels, ordered from least to most urgent.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Severity classifies how urgent a log event is.
///
/// Ordering comes from [`Severity::rank`], never from the enum's discriminants, so a level
/// can be inserted without renumbering anything that compares severities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    /// Log and abort the process.
    Terminal,
}

impl Severity {
    /// Every severity, least urgent first.
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::Terminal,
    ];

    /// Urgency rank. Higher is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Debug => 0,
            Severity::Info => 1,
            Severity::Warning => 2,
            Severity::Error => 3,
            Severity::Critical => 4,
            Severity::Terminal => 5,
        }
    }

    /// Total order by urgency.
    pub fn compare(a: Severity, b: Severity) -> Ordering {
        a.rank().cmp(&b.rank())
    }

    /// True when an event at this severity passes `threshold`.
    pub fn meets(self, threshold: Severity) -> bool {
        Severity::compare(self, threshold) != Ordering::Less
    }

    /// Natural-language tag used in non-compact lines and console echo.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Terminal => "EMERG",
        }
    }

    /// Short tag used in compact lines. At most five characters.
    pub fn compact_label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRIT",
            Severity::Terminal => "EMERG",
        }
    }

    /// Value of the `loglevel` field sent to the collector.
    pub fn wire_name(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Terminal => "emerg",
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        Severity::compare(*self, *other)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known severity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" | "crit" => Ok(Severity::Critical),
            "terminal" | "emerg" | "fatal" => Ok(Severity::Terminal),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warning,
            log::Level::Error => Severity::Error,
        }
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warning => tracing::Level::WARN,
            Severity::Error | Severity::Critical | Severity::Terminal => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_urgency() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should be below {:?}", pair[0], pair[1]);
        }
        assert_eq!(
            Severity::compare(Severity::Error, Severity::Error),
            Ordering::Equal
        );
        assert_eq!(
            Severity::compare(Severity::Terminal, Severity::Debug),
            Ordering::Greater
        );
    }

    #[test]
    fn meets_is_inclusive() {
        assert!(Severity::Warning.meets(Severity::Warning));
        assert!(Severity::Critical.meets(Severity::Warning));
        assert!(!Severity::Info.meets(Severity::Warning));
    }

    #[test]
    fn parses_all_spellings() {
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("emerg".parse::<Severity>().unwrap(), Severity::Terminal);
        assert_eq!(" Critical ".parse::<Severity>().unwrap(), Severity::Critical);
        assert!("loud".parse::<Severity>().is_err());
    }

    #[test]
    fn compact_labels_fit_five_columns() {
        for severity in Severity::ALL {
            assert!(severity.compact_label().len() <= 5);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let back: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(back, Severity::Warning);
    }
}
