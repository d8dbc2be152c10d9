//! Record output port for writing per-frame records.

use crate::domain::FrameRecord;

/// Port for outputting frame records.
pub trait RecordOutput {
    /// Writes a single frame record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, record: &FrameRecord) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
