//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error outside of record formatting (configuration parsing)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A field value cannot be encoded by a structured formatter
    #[error("Failed to serialize log record ({format_type}): {message}")]
    Serialization {
        format_type: String,
        message: String,
    },

    /// A formatter panicked while rendering a record
    #[error("Formatter '{formatter}' panicked: {message}")]
    FormatterPanic { formatter: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Sink error (generic)
    #[error("Sink error: {0}")]
    SinkError(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Serialization {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    pub fn formatter_panic(formatter: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterPanic {
            formatter: formatter.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn sink<S: Into<String>>(msg: S) -> Self {
        LoggerError::SinkError(msg.into())
    }

    /// True when the error came from rendering a record rather than writing it
    pub fn is_format_failure(&self) -> bool {
        matches!(
            self,
            LoggerError::Serialization { .. } | LoggerError::FormatterPanic { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::serialization("json", "unsupported value: NaN");
        assert!(matches!(err, LoggerError::Serialization { .. }));
        assert!(err.is_format_failure());

        let err = LoggerError::config("LoggerBuilder", "no sink configured");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(!err.is_format_failure());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::serialization("json", "unsupported value: NaN");
        assert_eq!(
            err.to_string(),
            "Failed to serialize log record (json): unsupported value: NaN"
        );

        let err = LoggerError::formatter_panic("text", "boom");
        assert_eq!(err.to_string(), "Formatter 'text' panicked: boom");

        let err = LoggerError::sink("closed");
        assert_eq!(err.to_string(), "Sink error: closed");
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::io_operation("writing record", "sink 'stdout' rejected write", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing record"));
        assert!(err.to_string().contains("rejected write"));
    }
}
