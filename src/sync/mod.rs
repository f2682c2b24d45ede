//! Cross-context synchronization.
//!
//! Every store attaches a `SyncListener` to its storage key. Writes made by
//! other browsing contexts queue notifications on the listener; the store
//! re-hydrates when `sync()` takes them. `SyncThread` drives `sync_all` on a
//! registry from a background thread.

mod listener;
mod thread;

pub use listener::SyncListener;
pub use thread::{SyncStats, SyncThread};
