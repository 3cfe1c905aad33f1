#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
#[cfg(feature = "emitter")]
use serde_json::json;

use crate::autocat::CategorizeResult;
use crate::library::GameId;

/// Progress notification from a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// One game finished with the given outcome.
    Game {
        id: GameId,
        result: CategorizeResult,
    },
    /// The run stopped early because the cancellation flag was set.
    Cancelled,
    /// The run produced its summary.
    Finished,
}

/// Receiver for batch progress. Any `FnMut(&BatchEvent)` closure works.
pub trait ProgressSink: Send {
    fn on_event(&mut self, event: &BatchEvent);
}

impl<F: FnMut(&BatchEvent) + Send> ProgressSink for F {
    fn on_event(&mut self, event: &BatchEvent) {
        self(event)
    }
}

/// Sink that reports progress through the log facade.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn on_event(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::Game { id, result } => {
                log::debug!("categorized game {}: {}", id, result)
            }
            BatchEvent::Cancelled => log::debug!("categorization cancelled"),
            BatchEvent::Finished => log::debug!("categorization finished"),
        }
    }
}

/// Sink that publishes progress as JSON payloads through an
/// `EventEmitter`, for in-process subscribers.
#[cfg(feature = "emitter")]
pub struct EmitterSink {
    emitter: EventEmitter,
    event_name: String,
}

#[cfg(feature = "emitter")]
impl EmitterSink {
    pub fn new(emitter: EventEmitter) -> Self {
        EmitterSink {
            emitter,
            event_name: "autocat.progress".to_string(),
        }
    }

    pub fn with_event_name(mut self, event_name: &str) -> Self {
        self.event_name = event_name.to_string();
        self
    }

    /// The emitter, for wiring subscribers after construction.
    pub fn emitter_mut(&mut self) -> &mut EventEmitter {
        &mut self.emitter
    }
}

#[cfg(feature = "emitter")]
impl ProgressSink for EmitterSink {
    fn on_event(&mut self, event: &BatchEvent) {
        let payload = match event {
            BatchEvent::Game { id, result } => {
                json!({ "game": id, "result": result.to_string() })
            }
            BatchEvent::Cancelled => json!({ "run": "cancelled" }),
            BatchEvent::Finished => json!({ "run": "finished" }),
        };
        // The emitter serializes payloads internally, so hand it the
        // JSON rendered as a string; subscribers take a `String`.
        self.emitter.emit(&self.event_name, payload.to_string());
    }
}
