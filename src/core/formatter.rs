//! Record formatters
//!
//! A formatter turns `(level, message, fields)` into the bytes written to a sink:
//! - `TextFormatter`: human-readable line (default)
//! - `JsonFormatter`: one JSON object per line

use super::error::{LoggerError, Result};
use super::fields::Fields;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde_json::{Map, Value};

/// Reserved key holding the level name in structured records
pub const LEVEL_KEY: &str = "level";
/// Reserved key holding the timestamp in structured records
pub const TIME_KEY: &str = "time";
/// Reserved key holding the message in structured records
pub const MESSAGE_KEY: &str = "msg";

/// Renders a log record into bytes
///
/// Implementations must be cheap to share between threads; the logger calls
/// `format` while holding its write guard.
pub trait Formatter: Send + Sync {
    fn format(&self, level: LogLevel, message: &str, fields: &Fields) -> Result<Vec<u8>>;

    fn name(&self) -> &str;
}

/// Human-readable formatter
///
/// Produces `"<timestamp>: <LEVEL> - <key>=<value> ... message: <message>\n"`.
/// Fields appear in insertion order, each followed by a single space.
/// Never fails: every field value has a text rendering.
///
/// # Example
///
/// ```
/// use titanlog::{Fields, Formatter, LogLevel, TextFormatter};
///
/// let line = TextFormatter::new()
///     .format(LogLevel::Info, "hello", &Fields::new())
///     .unwrap();
/// let line = String::from_utf8(line).unwrap();
/// assert!(line.ends_with(": INFO - message: hello\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    timestamp_format: TimestampFormat,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Formatter for TextFormatter {
    fn format(&self, level: LogLevel, message: &str, fields: &Fields) -> Result<Vec<u8>> {
        let mut field_pairs = String::new();
        for (key, value) in fields.iter() {
            field_pairs.push_str(&format!("{}={} ", key, value));
        }

        let line = format!(
            "{}: {} - {}message: {}\n",
            self.timestamp_format.now(),
            level.to_str(),
            field_pairs,
            message
        );

        Ok(line.into_bytes())
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// Structured JSON formatter
///
/// User fields are copied first, then `level`, `time` and `msg` are set so
/// they replace any user field with the same name. Each record ends with `\n`.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn encode_fields(&self, fields: &Fields) -> Result<Map<String, Value>> {
        let mut record = Map::new();
        for (key, value) in fields.iter() {
            let encoded = serde_json::to_value(value).map_err(|e| {
                let detail = format!("field '{}' ({}): {}", key, value.kind(), e);
                LoggerError::serialization(self.name(), detail)
            })?;
            record.insert(key.to_string(), encoded);
        }
        Ok(record)
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, level: LogLevel, message: &str, fields: &Fields) -> Result<Vec<u8>> {
        let mut record = self.encode_fields(fields)?;

        record.insert(LEVEL_KEY.to_string(), Value::String(level.to_str().to_string()));
        record.insert(TIME_KEY.to_string(), Value::String(self.timestamp_format.now()));
        record.insert(MESSAGE_KEY.to_string(), Value::String(message.to_string()));

        let mut bytes = serde_json::to_vec(&Value::Object(record))
            .map_err(|e| LoggerError::serialization(self.name(), e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn name(&self) -> &str {
        "json"
    }
}
