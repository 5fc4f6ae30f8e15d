//! Sink trait for log output destinations

use super::error::Result;
use std::sync::Arc;

/// Destination that accepts rendered records
///
/// A logger serializes its own writes, but loggers derived from one another
/// each hold their own guard while sharing one sink. A sink that must keep
/// records from different loggers apart has to make each `write` atomic itself.
pub trait Sink: Send + Sync {
    fn write(&self, bytes: &[u8]) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
