use event_emitter_rs::EventEmitter;

use crate::engine::MessageEngine;
use crate::error::StoreError;
use crate::store::SavedState;

/// Event name state changes are broadcast under.
pub const STATE_CHANGED: &str = "StateChanged";

/// Broadcasts engine state changes to in-process listeners, such as a UI
/// layer that re-renders on every change.
///
/// Payloads are the JSON form of [`SavedState`]. Each listener call runs on
/// its own thread; [`StateEmitter::publish`] waits for all of them before
/// returning, so listeners see successive states in order.
///
/// # Example
///
/// ```ignore
/// use message_composer::{MessageEngine, StateEmitter};
///
/// let mut emitter = StateEmitter::new();
/// emitter.on(|json| {
///     println!("state changed: {}", json);
/// });
///
/// let mut engine = MessageEngine::new();
/// emitter.attach(&mut engine);
/// ```
pub struct StateEmitter {
    event_emitter: EventEmitter,
}

impl Default for StateEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl StateEmitter {
    pub fn new() -> Self {
        Self {
            event_emitter: EventEmitter::new(),
        }
    }

    /// Register a listener for state changes.
    pub fn on<F>(&mut self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.event_emitter.on(STATE_CHANGED, listener);
    }

    pub fn publish(&mut self, state: &SavedState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        for handle in self.event_emitter.emit(STATE_CHANGED, json) {
            if handle.join().is_err() {
                tracing::warn!("state change listener panicked");
            }
        }
        Ok(())
    }

    /// Publish every change `engine` reports from now on.
    pub fn attach(mut self, engine: &mut MessageEngine) {
        engine.on_change(move |state| {
            if let Err(err) = self.publish(state) {
                tracing::warn!(error = %err, "failed to broadcast state change");
            }
        });
    }
}
