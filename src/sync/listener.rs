//! SyncListener - one store's view of changes made by other contexts.

use crate::storage::{BrowsingContext, Subscription};

/// Watches one storage key for writes made by other browsing contexts.
///
/// The owning store re-hydrates whenever pending notifications are taken.
/// Dropping the listener unsubscribes it.
pub struct SyncListener {
    subscription: Subscription,
}

impl SyncListener {
    /// Subscribe `context` to changes of `storage_key`.
    pub fn attach(context: &BrowsingContext, storage_key: &str) -> Self {
        Self {
            subscription: context.subscribe(storage_key),
        }
    }

    /// Take every waiting notification. Returns how many were taken.
    pub fn take_pending(&self) -> usize {
        self.subscription.drain().len()
    }
}
