//! StorageArea and BrowsingContext.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::bundle::ContentBundle;
use super::feed::{ChangeFeed, ContextId, StorageEvent, Subscription};
use super::memory::MemoryStorage;
use super::Storage;
use crate::error::StorageError;

/// One storage backend shared by any number of browsing contexts.
///
/// Clone-friendly via Arc: clones refer to the same backend and change feed.
#[derive(Clone)]
pub struct StorageArea {
    backend: Arc<dyn Storage>,
    feed: ChangeFeed,
    next_context: Arc<AtomicU64>,
}

impl StorageArea {
    /// Wrap a backend.
    pub fn new(backend: impl Storage + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            feed: ChangeFeed::default(),
            next_context: Arc::new(AtomicU64::new(1)),
        }
    }

    /// A fresh area over unlimited in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Open a new browsing context ("tab") on this area.
    pub fn open_context(&self) -> BrowsingContext {
        let id = ContextId(self.next_context.fetch_add(1, Ordering::SeqCst));
        debug!(context = %id, "opened browsing context");
        BrowsingContext {
            id,
            area: self.clone(),
        }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &dyn Storage {
        self.backend.as_ref()
    }

    /// Number of live change subscriptions across all contexts.
    pub fn subscriber_count(&self) -> usize {
        self.feed.subscriber_count()
    }

    /// Capture every key and value currently stored.
    pub fn export_bundle(&self) -> Result<ContentBundle, StorageError> {
        let mut bundle = ContentBundle::default();
        for key in self.backend.keys()? {
            if let Some(value) = self.backend.get_item(&key)? {
                bundle.entries.insert(key, value);
            }
        }
        Ok(bundle)
    }
}

/// One browsing context on a storage area.
///
/// Writes made through a context are announced to every *other* context
/// subscribed to the key; a context never observes its own writes as events.
#[derive(Clone)]
pub struct BrowsingContext {
    id: ContextId,
    area: StorageArea,
}

impl BrowsingContext {
    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn area(&self) -> &StorageArea {
        &self.area
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.area.backend.get_item(key)
    }

    /// Store `value` under `key`. Writing the value already stored is a no-op
    /// and announces nothing.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let old_value = self.area.backend.get_item(key)?;
        if old_value.as_deref() == Some(value) {
            return Ok(());
        }

        self.area.backend.set_item(key, value)?;
        self.area.feed.publish(StorageEvent {
            key: key.to_string(),
            old_value,
            new_value: Some(value.to_string()),
            source: self.id,
        });
        Ok(())
    }

    /// Remove `key`. Removing an absent key announces nothing.
    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let old_value = self.area.backend.get_item(key)?;
        if old_value.is_none() {
            return Ok(());
        }

        self.area.backend.remove_item(key)?;
        self.area.feed.publish(StorageEvent {
            key: key.to_string(),
            old_value,
            new_value: None,
            source: self.id,
        });
        Ok(())
    }

    /// Subscribe to changes of `key` made by other contexts.
    pub fn subscribe(&self, key: &str) -> Subscription {
        self.area.feed.subscribe(self.id, Some(key.to_string()))
    }

    /// Subscribe to changes of every key made by other contexts.
    pub fn subscribe_all(&self) -> Subscription {
        self.area.feed.subscribe(self.id, None)
    }

    /// Write every entry of `bundle` through this context. Returns the number
    /// of keys written; stops at the first storage failure.
    pub fn import_bundle(&self, bundle: &ContentBundle) -> Result<usize, StorageError> {
        let mut written = 0;
        for (key, value) in &bundle.entries {
            self.set_item(key, value)?;
            written += 1;
        }
        debug!(context = %self.id, written, "imported content bundle");
        Ok(written)
    }
}
