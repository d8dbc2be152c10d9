//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod frame_source;
mod gray_sink;
mod progress;
mod record_output;

pub use frame_source::FrameSource;
pub use gray_sink::GraySink;
pub use progress::{NoProgress, ProgressEvent, ProgressSink};
pub use record_output::RecordOutput;
