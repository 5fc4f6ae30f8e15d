//! Main logger implementation

use super::{
    error::{LoggerError, Result},
    fields::{FieldValue, Fields},
    formatter::{Formatter, TextFormatter},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::Sink,
};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Receives errors the logger cannot return to its caller
///
/// Level methods never fail. Formatting failures and sink errors are handed to
/// this callback instead; without one they are printed to stderr.
pub type ErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Leveled structured logger
///
/// A logger owns its field set and its write guard. The sink, the metrics and
/// the error callback are shared with every logger derived through
/// [`Logger::with_fields`].
///
/// Records below the threshold are discarded before anything else happens.
/// Admitted records are formatted and written while the guard is held, so two
/// records from one logger never interleave in the sink.
///
/// # Example
///
/// ```
/// use titanlog::{fields, JsonFormatter, Logger, LogLevel, MemorySink};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let logger = Logger::new(LogLevel::Info, Arc::clone(&sink));
/// logger.set_formatter(JsonFormatter::new());
///
/// logger.debug("filtered");
/// logger
///     .with_fields(&fields! { "user_id" => 12345, "action" => "payment" })
///     .info("Payment processed successfully");
///
/// assert_eq!(sink.write_count(), 1);
/// ```
pub struct Logger {
    threshold: LogLevel,
    sink: Arc<dyn Sink>,
    fields: Fields,
    /// Held across format and write; one record at a time per logger
    write_guard: Mutex<()>,
    formatter: RwLock<Arc<dyn Formatter>>,
    metrics: Arc<LoggerMetrics>,
    on_error: Option<ErrorCallback>,
}

impl Logger {
    /// Create a logger with no fields and a [`TextFormatter`]
    #[must_use]
    pub fn new<S: Sink + 'static>(threshold: LogLevel, sink: S) -> Self {
        Self::from_parts(
            threshold,
            Arc::new(sink),
            Fields::new(),
            Arc::new(TextFormatter::new()),
            None,
        )
    }

    fn from_parts(
        threshold: LogLevel,
        sink: Arc<dyn Sink>,
        fields: Fields,
        formatter: Arc<dyn Formatter>,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        Self {
            threshold,
            sink,
            fields,
            write_guard: Mutex::new(()),
            formatter: RwLock::new(formatter),
            metrics: Arc::new(LoggerMetrics::new()),
            on_error,
        }
    }

    /// Replace the active formatter
    ///
    /// Waits for any in-flight record on this logger to finish. Loggers
    /// already derived from this one keep the formatter they were created with.
    pub fn set_formatter<F: Formatter + 'static>(&self, formatter: F) {
        self.set_shared_formatter(Arc::new(formatter));
    }

    /// Like [`Logger::set_formatter`], for a formatter shared with other loggers
    pub fn set_shared_formatter(&self, formatter: Arc<dyn Formatter>) {
        let _guard = self.write_guard.lock();
        *self.formatter.write() = formatter;
    }

    /// Derive a logger carrying this logger's fields overlaid by `fields`
    ///
    /// The new logger copies both field sets, so later changes to `fields` or
    /// to this logger are not observed by it. It shares the sink, threshold,
    /// current formatter, metrics and error callback, and gets its own guard.
    /// Never waits for a record this logger is writing.
    #[must_use]
    pub fn with_fields(&self, fields: &Fields) -> Logger {
        let formatter = Arc::clone(&self.formatter.read());
        Logger {
            threshold: self.threshold,
            sink: Arc::clone(&self.sink),
            fields: self.fields.merged(fields),
            write_guard: Mutex::new(()),
            formatter: RwLock::new(formatter),
            metrics: Arc::clone(&self.metrics),
            on_error: self.on_error.clone(),
        }
    }

    /// Shorthand for deriving with a single field
    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Logger
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.with_fields(&Fields::new().with_field(key, value))
    }

    /// Whether a record at `level` would be written
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Name of the formatter currently in the slot
    pub fn formatter_name(&self) -> String {
        self.formatter.read().name().to_string()
    }

    /// The sink shared by this logger and everything derived from it
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    /// Log `message` at `level`
    ///
    /// Below the threshold this returns immediately: no lock, no formatter
    /// call, no clock read. Otherwise failures are reported through the error
    /// callback and the record is dropped.
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled(level) {
            return;
        }

        match self.write_record(level, message.as_ref()) {
            Ok(()) => {
                self.metrics.record_logged();
            }
            Err(e) => {
                if e.is_format_failure() {
                    self.metrics.record_format_failure();
                } else {
                    self.metrics.record_write_failure();
                }
                self.report(&e);
            }
        }
    }

    /// Format and write one record while holding the guard
    fn write_record(&self, level: LogLevel, message: &str) -> Result<()> {
        let _guard = self.write_guard.lock();
        let formatter = Arc::clone(&self.formatter.read());

        let bytes = panic::catch_unwind(AssertUnwindSafe(|| {
            formatter.format(level, message, &self.fields)
        }))
        .map_err(|panic_info| {
            LoggerError::formatter_panic(formatter.name(), panic_message(panic_info))
        })??;

        panic::catch_unwind(AssertUnwindSafe(|| self.sink.write(&bytes))).map_err(|panic_info| {
            LoggerError::sink(format!(
                "sink '{}' panicked: {}",
                self.sink.name(),
                panic_message(panic_info)
            ))
        })?
    }

    fn report(&self, error: &LoggerError) {
        match &self.on_error {
            Some(callback) => callback(error),
            None if error.is_format_failure() => {
                eprintln!("[LOGGER ERROR] Failed to format log: {}", error)
            }
            None => eprintln!(
                "[LOGGER ERROR] Failed to write log to sink '{}': {}",
                self.sink.name(),
                error
            ),
        }
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Log at [`LogLevel::Fatal`]. Does not terminate the process.
    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }
}

fn panic_message(panic_info: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .field("sink", &self.sink.name())
            .field("fields", &self.fields)
            .field("formatter", &self.formatter_name())
            .finish()
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use titanlog::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .threshold(LogLevel::Debug)
///     .sink(WriterSink::stderr())
///     .formatter(JsonFormatter::new())
///     .field("service", "billing")
///     .on_error(Arc::new(|err: &LoggerError| eprintln!("log dropped: {}", err)))
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.formatter_name(), "json");
/// ```
pub struct LoggerBuilder {
    threshold: LogLevel,
    sink: Option<Arc<dyn Sink>>,
    formatter: Arc<dyn Formatter>,
    fields: Fields,
    on_error: Option<ErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            threshold: LogLevel::Info,
            sink: None,
            formatter: Arc::new(TextFormatter::new()),
            fields: Fields::new(),
            on_error: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: LogLevel) -> Self {
        self.threshold = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Use a sink that is already shared elsewhere
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = Arc::from(formatter);
        self
    }

    /// Overlay initial fields; later calls win on key collision
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: &Fields) -> Self {
        self.fields.extend_from(fields);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key, value);
        self
    }

    /// Set the callback that receives formatting and sink errors
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let sink = self
            .sink
            .ok_or_else(|| LoggerError::config("LoggerBuilder", "no sink configured"))?;

        Ok(Logger::from_parts(
            self.threshold,
            sink,
            self.fields,
            self.formatter,
            self.on_error,
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
