//! Core logger types and traits

pub mod config;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use config::{LoggerConfig, OutputFormat};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use formatter::{Formatter, JsonFormatter, TextFormatter, LEVEL_KEY, MESSAGE_KEY, TIME_KEY};
pub use log_level::{LogLevel, UNKNOWN_LEVEL_NAME};
pub use logger::{ErrorCallback, Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use sink::Sink;
pub use timestamp::TimestampFormat;
