mod progress;
mod runner;

#[cfg(feature = "emitter")]
pub use progress::EmitterSink;
pub use progress::{BatchEvent, LogSink, ProgressSink};
pub use runner::{BatchRunner, BatchSummary};
