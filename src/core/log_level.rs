//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name rendered for ordinals that do not map to a level.
pub const UNKNOWN_LEVEL_NAME: &str = "UNKNOWN";

/// Severity of a log record. Higher ordinals are more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Verbose output, useful for developers.
    Debug = 0,
    /// Standard operational messages.
    #[default]
    Info = 1,
    /// Non-critical issues that should be looked at.
    Warn = 2,
    /// Runtime errors that require attention.
    Error = 3,
    /// Severe errors. Purely a label: logging at this level never exits the process.
    Fatal = 4,
}

impl LogLevel {
    /// Every level, least severe first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    #[inline]
    pub fn as_ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Warn),
            3 => Some(LogLevel::Error),
            4 => Some(LogLevel::Fatal),
            _ => None,
        }
    }

    /// Canonical name for a raw ordinal, `"UNKNOWN"` when out of range.
    ///
    /// ```
    /// use titanlog::LogLevel;
    ///
    /// assert_eq!(LogLevel::name_of(2), "WARN");
    /// assert_eq!(LogLevel::name_of(42), "UNKNOWN");
    /// ```
    pub fn name_of(ordinal: u8) -> &'static str {
        Self::from_ordinal(ordinal).map_or(UNKNOWN_LEVEL_NAME, |level| level.to_str())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = String;

    fn try_from(ordinal: u8) -> Result<Self, String> {
        Self::from_ordinal(ordinal).ok_or_else(|| format!("Invalid log level ordinal: {}", ordinal))
    }
}
