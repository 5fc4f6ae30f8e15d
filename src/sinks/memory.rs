//! In-memory sink that keeps every write

use crate::core::{Result, Sink};
use parking_lot::Mutex;

/// Records each write as one entry
///
/// Useful for tests and for inspecting output: a record that was written in a
/// single `write` call is always retrievable as a single entry.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write, in arrival order
    pub fn records(&self) -> Vec<Vec<u8>> {
        self.records.lock().clone()
    }

    /// Every write as text with the trailing newline removed
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| {
                let text = String::from_utf8_lossy(record);
                text.strip_suffix('\n').unwrap_or(&text).to_string()
            })
            .collect()
    }

    /// All writes concatenated
    pub fn contents(&self) -> String {
        let records = self.records.lock();
        String::from_utf8_lossy(&records.concat()).into_owned()
    }

    pub fn write_count(&self) -> usize {
        self.records.lock().len()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        self.records.lock().push(bytes.to_vec());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_each_write() {
        let sink = MemorySink::new();
        sink.write(b"a\n").unwrap();
        sink.write(b"b\n").unwrap();

        assert_eq!(sink.write_count(), 2);
        assert_eq!(sink.lines(), ["a", "b"]);
        assert_eq!(sink.contents(), "a\nb\n");
        assert_eq!(sink.records()[1], b"b\n");

        sink.clear();
        assert_eq!(sink.write_count(), 0);
    }
}
