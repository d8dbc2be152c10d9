//! JSON output adapter.

use anyhow::Result;
use frameseq_core::{FrameRecord, RecordOutput};
use std::io::{self, Write};
use std::sync::Mutex;

/// How records are laid out on the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// One object per line, written as records arrive.
    Lines,
    /// A single array, written on flush.
    Array { pretty: bool },
}

/// JSON output adapter for frame records.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    layout: Layout,
    pending: Mutex<Vec<FrameRecord>>,
}

impl JsonOutput {
    /// Creates a JSON Lines output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::lines(Box::new(io::stdout()))
    }

    /// Creates an output that writes one JSON array to stdout on flush.
    #[must_use]
    pub fn stdout_array(pretty: bool) -> Self {
        Self::array(Box::new(io::stdout()), pretty)
    }

    /// Creates a JSON Lines output writing to the given writer.
    #[must_use]
    pub fn lines(writer: Box<dyn Write + Send>) -> Self {
        Self::with_layout(writer, Layout::Lines)
    }

    /// Creates an array output writing to the given writer.
    #[must_use]
    pub fn array(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self::with_layout(writer, Layout::Array { pretty })
    }

    fn with_layout(writer: Box<dyn Write + Send>, layout: Layout) -> Self {
        Self {
            writer: Mutex::new(writer),
            layout,
            pending: Mutex::new(Vec::new()),
        }
    }
}

impl RecordOutput for JsonOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, record: &FrameRecord) -> Result<()> {
        if let Layout::Array { .. } = self.layout {
            self.pending
                .lock()
                .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
                .push(record.clone());
            return Ok(());
        }

        let json = serde_json::to_string(record)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;

        if let Layout::Array { pretty } = self.layout {
            let records = std::mem::take(
                &mut *self
                    .pending
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?,
            );
            let json = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            writeln!(writer, "{json}")?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use frameseq_core::Intrinsics;
    use std::sync::Arc;

    /// Writer that keeps everything in a shared buffer.
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn record(index: usize) -> FrameRecord {
        FrameRecord {
            index,
            name: format!("frame_{index}"),
            path: None,
            width: 4,
            height: 2,
            progress: 0.5,
            mean_luma: 10.0,
            intrinsics: Intrinsics::new(500.0, 500.0, 320.0, 240.0),
            bounding_boxes: Vec::new(),
            gray_path: None,
        }
    }

    #[test]
    fn test_lines_written_immediately() {
        let buf = Shared::default();
        let output = JsonOutput::lines(Box::new(buf.clone()));

        output.write(&record(0)).unwrap();
        output.write(&record(1)).unwrap();

        let text = buf.text();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("\"name\":\"frame_1\""));
    }

    #[test]
    fn test_array_written_on_flush() {
        let buf = Shared::default();
        let output = JsonOutput::array(Box::new(buf.clone()), false);

        output.write(&record(0)).unwrap();
        output.write(&record(1)).unwrap();
        assert!(buf.text().is_empty());

        output.flush().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(buf.text().trim()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_array_on_flush() {
        let buf = Shared::default();
        let output = JsonOutput::array(Box::new(buf.clone()), true);
        output.flush().unwrap();
        assert_eq!(buf.text().trim(), "[]");
    }
}
