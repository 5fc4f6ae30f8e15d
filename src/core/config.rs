//! Serializable logger configuration
//!
//! Lets applications describe the threshold, output format and timestamp
//! format in a config file and turn it into a [`LoggerBuilder`].

use super::error::Result;
use super::formatter::{Formatter, JsonFormatter, TextFormatter};
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerBuilder};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format selector for configuration files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `2025-01-08T10:30:45Z: INFO - user=alice message: Request processed`
    #[default]
    Text,

    /// Example: `{"level":"INFO","msg":"Request processed","time":"2025-01-08T10:30:45Z","user":"alice"}`
    Json,
}

impl OutputFormat {
    /// Build the formatter for this output format
    pub fn formatter(&self, timestamp_format: TimestampFormat) -> Box<dyn Formatter> {
        match self {
            OutputFormat::Text => {
                Box::new(TextFormatter::new().with_timestamp_format(timestamp_format))
            }
            OutputFormat::Json => {
                Box::new(JsonFormatter::new().with_timestamp_format(timestamp_format))
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Logger settings that can live in a config file
///
/// # Example
///
/// ```
/// use titanlog::{LoggerConfig, LogLevel, MemorySink, OutputFormat};
///
/// let config = LoggerConfig::from_json(r#"{"level": "warn", "format": "json"}"#).unwrap();
/// assert_eq!(config.level, LogLevel::Warn);
/// assert_eq!(config.format, OutputFormat::Json);
///
/// let logger = config.into_builder().sink(MemorySink::new()).build().unwrap();
/// assert_eq!(logger.formatter_name(), "json");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    #[serde(with = "level_name")]
    pub level: LogLevel,
    pub format: OutputFormat,
    #[serde(deserialize_with = "checked_timestamp")]
    pub timestamp: TimestampFormat,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder preloaded with these settings; the sink still has to be set
    pub fn into_builder(self) -> LoggerBuilder {
        Logger::builder()
            .threshold(self.level)
            .boxed_formatter(self.format.formatter(self.timestamp))
    }
}

/// Custom timestamp formats are validated when the config is read
fn checked_timestamp<'de, D>(deserializer: D) -> std::result::Result<TimestampFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let format = TimestampFormat::deserialize(deserializer)?;
    format.validate().map_err(serde::de::Error::custom)?;
    Ok(format)
}

/// Levels in config files are parsed case-insensitively
mod level_name {
    use super::LogLevel;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(level: &LogLevel, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(level.to_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LogLevel, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.timestamp, TimestampFormat::Rfc3339);
    }

    #[test]
    fn test_full_config() {
        let config = LoggerConfig::from_json(
            r#"{"level": "DEBUG", "format": "text", "timestamp": "rfc3339_millis"}"#,
        )
        .unwrap();

        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.timestamp, TimestampFormat::Rfc3339Millis);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = LoggerConfig::from_json(r#"{"level": "loud"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_invalid_custom_timestamp_rejected() {
        let err = LoggerConfig::from_json(r#"{"timestamp": {"custom": "%Q"}}"#).unwrap_err();
        assert!(matches!(err, LoggerError::JsonError(_)));
        assert!(err.to_string().contains("invalid strftime format '%Q'"));

        let config = LoggerConfig::from_json(r#"{"timestamp": {"custom": "%Y-%m-%d"}}"#).unwrap();
        assert_eq!(config.timestamp, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }

    #[test]
    fn test_roundtrip_through_json() {
        let config = LoggerConfig {
            level: LogLevel::Error,
            format: OutputFormat::Json,
            timestamp: TimestampFormat::Custom("%H:%M".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(LoggerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::default().formatter(TimestampFormat::Rfc3339).name(), "text");
    }
}
