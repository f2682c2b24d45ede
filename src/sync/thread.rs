//! Background thread that keeps a registry's stores in sync.

use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, trace};

use crate::registry::StoreRegistry;

/// Statistics from the sync thread.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncStats {
    /// Number of `sync_all` passes completed.
    pub polls: usize,
    /// Number of store re-hydrations those passes triggered.
    pub rehydrations: usize,
}

/// A background thread that calls `StoreRegistry::sync_all` every
/// `interval` until stopped.
///
/// ```ignore
/// let site = Site::open(&area.open_context())?;
/// let sync = SyncThread::spawn(site.registry().clone(), Duration::from_millis(250));
/// // ... other contexts write ...
/// let stats = sync.stop();
/// ```
pub struct SyncThread {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<SyncStats>>,
}

impl SyncThread {
    pub fn spawn(registry: StoreRegistry, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = channel();

        let handle = thread::spawn(move || {
            let mut stats = SyncStats::default();

            loop {
                stats.polls += 1;
                let rehydrated = registry.sync_all();
                if rehydrated > 0 {
                    debug!(rehydrated, "sync pass re-hydrated stores");
                }
                stats.rehydrations += rehydrated;

                match stop_rx.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }
            }

            trace!(polls = stats.polls, "sync thread stopped");
            stats
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Signal the thread to stop and wait for it. Returns its statistics.
    pub fn stop(mut self) -> SyncStats {
        let _ = self.stop_tx.send(());
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_default(),
            None => SyncStats::default(),
        }
    }

    /// Signal the thread to stop without waiting.
    pub fn signal_stop(&self) {
        let _ = self.stop_tx.send(());
    }
}

impl Drop for SyncThread {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
    }
}
