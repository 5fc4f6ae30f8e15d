//! # Titanlog
//!
//! A small leveled structured logger.
//!
//! ## Features
//!
//! - **Level Filtering**: records below the threshold cost one comparison
//! - **Derived Contexts**: `with_fields` returns a new logger with copied fields
//! - **Pluggable Formatters**: human-readable text or one JSON object per line
//! - **Thread Safe**: each logger serializes its own format-and-write sequence
//!
//! ```
//! use titanlog::prelude::*;
//!
//! let logger = Logger::new(LogLevel::Info, WriterSink::stdout());
//! logger.set_formatter(JsonFormatter::new());
//!
//! let request_logger = logger.with_fields(&fields! { "request_id" => "r-42" });
//! request_logger.info("request accepted");
//! ```
//!
//! There is no global logger: components that log take a `Logger` (or an
//! `Arc<Logger>`) when they are constructed.

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ErrorCallback, FieldValue, Fields, Formatter, JsonFormatter, LogLevel, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result, Sink,
        TextFormatter, TimestampFormat,
    };
    pub use crate::fields;
    pub use crate::sinks::{FileSink, MemorySink, WriterSink};
}

pub use crate::core::{
    ErrorCallback, FieldValue, Fields, Formatter, JsonFormatter, LogLevel, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result, Sink, TextFormatter,
    TimestampFormat,
};
pub use sinks::{FileSink, MemorySink, WriterSink};
