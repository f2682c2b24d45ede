//! CollectionStore - an ordered, keyed collection persisted under one key.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use super::notify::Notifier;
use super::{check_records, read_lock, write_lock, DuplicatePolicy, Patch, Record, UpdateMode};
use crate::error::StoreError;
use crate::storage::BrowsingContext;
use crate::sync::SyncListener;

struct CollectionInner<T> {
    context: BrowsingContext,
    records: RwLock<Vec<T>>,
    ready: AtomicBool,
    listener: SyncListener,
    notifier: Notifier,
}

/// A collection of `T` records owned by one browsing context.
///
/// Clone-friendly via Arc: clones share state. The store detaches from
/// cross-context sync when the last clone is dropped.
pub struct CollectionStore<T: Record> {
    inner: Arc<CollectionInner<T>>,
}

impl<T: Record> Clone for CollectionStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Record> CollectionStore<T> {
    /// Create the store without loading it. `is_ready()` is false and the
    /// collection reads as empty until `hydrate()` runs.
    pub fn new(context: &BrowsingContext) -> Self {
        Self {
            inner: Arc::new(CollectionInner {
                context: context.clone(),
                records: RwLock::new(Vec::new()),
                ready: AtomicBool::new(false),
                listener: SyncListener::attach(context, T::STORAGE_KEY),
                notifier: Notifier::new(),
            }),
        }
    }

    /// Create and hydrate the store.
    pub fn open(context: &BrowsingContext) -> Self {
        let store = Self::new(context);
        store.hydrate();
        store
    }

    pub fn storage_key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    /// False until the first `hydrate()` completes.
    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::SeqCst)
    }

    /// Load the collection from storage, seeding defaults when the key is
    /// absent, unreadable or fails validation.
    pub fn hydrate(&self) {
        // Read under the write lock so a concurrent mutation cannot land
        // between the storage read and the swap.
        let mut records = write_lock(&self.inner.records);
        *records = match self.load() {
            Some(stored) => stored,
            None => {
                let defaults = T::defaults();
                self.persist(&defaults);
                defaults
            }
        };
        debug!(storage_key = T::STORAGE_KEY, count = records.len(), "hydrated collection");
        drop(records);

        self.inner.ready.store(true, Ordering::SeqCst);
        self.inner.notifier.notify(T::STORAGE_KEY);
    }

    fn load(&self) -> Option<Vec<T>> {
        let raw = match self.inner.context.get_item(T::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(storage_key = T::STORAGE_KEY, "seeding default collection");
                return None;
            }
            Err(e) => {
                warn!(storage_key = T::STORAGE_KEY, error = %e, "storage read failed, using defaults");
                return None;
            }
        };

        let records: Vec<T> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(storage_key = T::STORAGE_KEY, error = %e, "malformed collection, using defaults");
                return None;
            }
        };

        if let Err(reason) = check_records(&records) {
            warn!(storage_key = T::STORAGE_KEY, %reason, "invalid collection, using defaults");
            return None;
        }
        Some(records)
    }

    /// Write the full collection. Failures are logged; in-memory state stays
    /// authoritative for this context.
    fn persist(&self, records: &[T]) {
        let raw = match serde_json::to_string(records) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(storage_key = T::STORAGE_KEY, error = %e, "failed to serialize collection");
                return;
            }
        };
        if let Err(e) = self.inner.context.set_item(T::STORAGE_KEY, &raw) {
            warn!(storage_key = T::STORAGE_KEY, error = %e, "failed to persist collection");
        }
    }

    fn changed(&self) {
        self.inner.notifier.notify(T::STORAGE_KEY);
    }

    /// Snapshot of every record, in order.
    pub fn all(&self) -> Vec<T> {
        read_lock(&self.inner.records).clone()
    }

    /// First record whose key equals `key`.
    pub fn get(&self, key: &str) -> Option<T> {
        read_lock(&self.inner.records)
            .iter()
            .find(|record| record.key() == key)
            .cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        read_lock(&self.inner.records)
            .iter()
            .any(|record| record.key() == key)
    }

    /// Records matching a predicate, in order.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        read_lock(&self.inner.records)
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        read_lock(&self.inner.records).len()
    }

    pub fn is_empty(&self) -> bool {
        read_lock(&self.inner.records).is_empty()
    }

    /// Prepend a record and persist.
    ///
    /// Under `DuplicatePolicy::Reject` an existing key fails with
    /// `StoreError::DuplicateKey` and nothing changes.
    pub fn add(&self, record: T) -> Result<(), StoreError> {
        record
            .validate()
            .map_err(|reason| StoreError::invalid(T::STORAGE_KEY, reason))?;

        let mut records = write_lock(&self.inner.records);
        if T::DUPLICATES == DuplicatePolicy::Reject
            && records.iter().any(|existing| existing.key() == record.key())
        {
            return Err(StoreError::DuplicateKey {
                storage_key: T::STORAGE_KEY.to_string(),
                key: record.key().to_string(),
            });
        }

        records.insert(0, record);
        self.persist(&records);
        drop(records);

        self.changed();
        Ok(())
    }

    /// Apply `patch` to every record keyed `key`, per `T::UPDATE_MODE`.
    ///
    /// Returns whether anything changed. No matching record is a silent
    /// no-op; a patch producing an invalid record is logged and ignored.
    pub fn update(&self, key: &str, patch: &Patch) -> bool {
        self.try_update(key, patch).unwrap_or_else(|e| {
            warn!(storage_key = T::STORAGE_KEY, key, error = %e, "update rejected");
            false
        })
    }

    /// Like [`update`](Self::update), but reports a rejected patch.
    pub fn try_update(&self, key: &str, patch: &Patch) -> Result<bool, StoreError> {
        self.rewrite(key, |existing| {
            let updated = match T::UPDATE_MODE {
                UpdateMode::Merge => patch.merge_into(existing),
                UpdateMode::Replace => patch.to_record(),
            };
            updated.map_err(|reason| StoreError::invalid(T::STORAGE_KEY, reason))
        })
    }

    /// Replace every record keyed `key` with `record`, whatever the update
    /// mode. Returns whether anything changed.
    pub fn replace(&self, key: &str, record: T) -> bool {
        self.try_replace(key, record).unwrap_or_else(|e| {
            warn!(storage_key = T::STORAGE_KEY, key, error = %e, "replace rejected");
            false
        })
    }

    pub fn try_replace(&self, key: &str, record: T) -> Result<bool, StoreError> {
        self.rewrite(key, |_| Ok(record.clone()))
    }

    fn rewrite(
        &self,
        key: &str,
        apply: impl Fn(&T) -> Result<T, StoreError>,
    ) -> Result<bool, StoreError> {
        let mut records = write_lock(&self.inner.records);
        if !records.iter().any(|record| record.key() == key) {
            debug!(storage_key = T::STORAGE_KEY, key, "no record to update");
            return Ok(false);
        }

        let next = records
            .iter()
            .map(|record| {
                if record.key() == key {
                    apply(record)
                } else {
                    Ok(record.clone())
                }
            })
            .collect::<Result<Vec<T>, StoreError>>()?;
        check_records(&next).map_err(|reason| StoreError::invalid(T::STORAGE_KEY, reason))?;

        *records = next;
        self.persist(&records);
        drop(records);

        self.changed();
        Ok(true)
    }

    /// Remove every record keyed `key`. Returns whether anything was removed;
    /// deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) -> bool {
        self.delete_many([key]) > 0
    }

    /// Remove every record whose key is in `keys`. Returns how many records
    /// were removed.
    pub fn delete_many<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keys: Vec<String> = keys.into_iter().map(|key| key.as_ref().to_string()).collect();
        let mut records = write_lock(&self.inner.records);
        let before = records.len();
        records.retain(|record| !keys.iter().any(|key| key == record.key()));
        let removed = before - records.len();
        if removed == 0 {
            return 0;
        }

        self.persist(&records);
        drop(records);

        self.changed();
        removed
    }

    /// Re-hydrate if another context changed this store's key since the last
    /// call. Returns whether a re-hydration happened.
    pub fn sync(&self) -> bool {
        if self.inner.listener.take_pending() == 0 {
            return false;
        }
        debug!(storage_key = T::STORAGE_KEY, "external change, re-hydrating");
        self.hydrate();
        true
    }

    /// Register a callback fired with the storage key after every mutation
    /// and hydration. Callbacks run asynchronously.
    #[cfg(feature = "emitter")]
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.inner.notifier.on_change(listener);
    }
}
