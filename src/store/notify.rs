//! Local change notifications for a store's own subscribers.

#[cfg(feature = "emitter")]
use std::sync::{Mutex, PoisonError};

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

/// Event name emitted after every mutation and hydration.
#[cfg(feature = "emitter")]
pub(crate) const CHANGE_EVENT: &str = "change";

pub(crate) struct Notifier {
    #[cfg(feature = "emitter")]
    emitter: Mutex<EventEmitter>,
}

impl Notifier {
    pub(crate) fn new() -> Self {
        Self {
            #[cfg(feature = "emitter")]
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    /// Tell subscribers that `storage_key` changed. Listeners run
    /// asynchronously.
    #[cfg(feature = "emitter")]
    pub(crate) fn notify(&self, storage_key: &str) {
        let mut emitter = self.emitter.lock().unwrap_or_else(PoisonError::into_inner);
        emitter.emit(CHANGE_EVENT, storage_key.to_string());
    }

    #[cfg(not(feature = "emitter"))]
    pub(crate) fn notify(&self, _storage_key: &str) {}

    #[cfg(feature = "emitter")]
    pub(crate) fn on_change<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self.emitter.lock().unwrap_or_else(PoisonError::into_inner);
        emitter.on(CHANGE_EVENT, listener);
    }
}
