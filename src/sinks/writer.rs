//! Sink over any `std::io::Write`

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Wraps an `io::Write` behind a mutex so every record is written whole
///
/// # Example
///
/// ```
/// use titanlog::{Logger, LogLevel, WriterSink};
///
/// let logger = Logger::new(LogLevel::Info, WriterSink::stdout());
/// logger.info("to stdout");
/// ```
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named(writer, "writer")
    }

    pub fn named(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::named(io::stdout(), "stdout")
    }
}

impl WriterSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::named(io::stderr(), "stderr")
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        self.writer.lock().write_all(bytes).map_err(|e| {
            LoggerError::io_operation("writing record", format!("sink '{}'", self.name), e)
        })
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_whole_records() {
        let sink = WriterSink::new(Vec::new());
        sink.write(b"first\n").unwrap();
        sink.write(b"second\n").unwrap();

        assert_eq!(sink.into_inner(), b"first\nsecond\n");
    }

    #[test]
    fn test_write_error_carries_context() {
        let sink = WriterSink::named(ClosedPipe, "pipe");
        let err = sink.write(b"lost\n").unwrap_err();

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("sink 'pipe'"));
    }

    #[test]
    fn test_names() {
        assert_eq!(WriterSink::stdout().name(), "stdout");
        assert_eq!(WriterSink::stderr().name(), "stderr");
        assert_eq!(WriterSink::new(Vec::new()).name(), "writer");
    }
}
