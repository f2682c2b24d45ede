//! SingletonStore - one configuration record persisted under one key.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::notify::Notifier;
use super::patch::{kind, shallow_merge};
use super::{read_lock, write_lock, Patch, Singleton};
use crate::error::StoreError;
use crate::storage::BrowsingContext;
use crate::sync::SyncListener;

struct SingletonInner<T> {
    context: BrowsingContext,
    value: RwLock<T>,
    ready: AtomicBool,
    listener: SyncListener,
    notifier: Notifier,
}

/// A single `T` record owned by one browsing context.
///
/// Reads return the default value until `hydrate()` runs. Stored fields are
/// merged over the default, so records saved before a field existed still
/// load.
pub struct SingletonStore<T: Singleton> {
    inner: Arc<SingletonInner<T>>,
}

impl<T: Singleton> Clone for SingletonStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Singleton> SingletonStore<T> {
    pub fn new(context: &BrowsingContext) -> Self {
        Self {
            inner: Arc::new(SingletonInner {
                context: context.clone(),
                value: RwLock::new(T::default_value()),
                ready: AtomicBool::new(false),
                listener: SyncListener::attach(context, T::STORAGE_KEY),
                notifier: Notifier::new(),
            }),
        }
    }

    pub fn open(context: &BrowsingContext) -> Self {
        let store = Self::new(context);
        store.hydrate();
        store
    }

    pub fn storage_key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::SeqCst)
    }

    /// Load the record, merging stored fields over the default. An absent,
    /// unreadable or invalid value is replaced by the default in storage.
    pub fn hydrate(&self) {
        // Read under the write lock so a concurrent mutation cannot land
        // between the storage read and the swap.
        let mut value = write_lock(&self.inner.value);
        *value = match self.load() {
            Some(stored) => stored,
            None => {
                let default = T::default_value();
                self.persist(&default);
                default
            }
        };
        drop(value);

        debug!(storage_key = T::STORAGE_KEY, "hydrated singleton");
        self.inner.ready.store(true, Ordering::SeqCst);
        self.inner.notifier.notify(T::STORAGE_KEY);
    }

    fn load(&self) -> Option<T> {
        let raw = match self.inner.context.get_item(T::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(storage_key = T::STORAGE_KEY, "seeding default singleton");
                return None;
            }
            Err(e) => {
                warn!(storage_key = T::STORAGE_KEY, error = %e, "storage read failed, using default");
                return None;
            }
        };

        let stored = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                warn!(storage_key = T::STORAGE_KEY, found = kind(&other), "stored singleton is not an object, using default");
                return None;
            }
            Err(e) => {
                warn!(storage_key = T::STORAGE_KEY, error = %e, "malformed singleton, using default");
                return None;
            }
        };

        let merged = match Self::merge_over_default(&stored) {
            Ok(merged) => merged,
            Err(reason) => {
                warn!(storage_key = T::STORAGE_KEY, %reason, "invalid singleton, using default");
                return None;
            }
        };
        if let Err(reason) = merged.validate() {
            warn!(storage_key = T::STORAGE_KEY, %reason, "invalid singleton, using default");
            return None;
        }
        Some(merged)
    }

    fn merge_over_default(stored: &serde_json::Map<String, Value>) -> Result<T, String> {
        let mut fields = match serde_json::to_value(T::default_value()).map_err(|e| e.to_string())? {
            Value::Object(fields) => fields,
            other => return Err(format!("default is {}, not an object", kind(&other))),
        };
        shallow_merge(&mut fields, stored);
        serde_json::from_value(Value::Object(fields)).map_err(|e| e.to_string())
    }

    fn persist(&self, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(storage_key = T::STORAGE_KEY, error = %e, "failed to serialize singleton");
                return;
            }
        };
        if let Err(e) = self.inner.context.set_item(T::STORAGE_KEY, &raw) {
            warn!(storage_key = T::STORAGE_KEY, error = %e, "failed to persist singleton");
        }
    }

    /// Snapshot of the current record.
    pub fn get(&self) -> T {
        read_lock(&self.inner.value).clone()
    }

    /// Shallow-merge `patch` over the current record and persist. A patch
    /// producing an invalid record is logged and ignored.
    pub fn update(&self, patch: &Patch) {
        if let Err(e) = self.try_update(patch) {
            warn!(storage_key = T::STORAGE_KEY, error = %e, "update rejected");
        }
    }

    pub fn try_update(&self, patch: &Patch) -> Result<(), StoreError> {
        let mut value = write_lock(&self.inner.value);
        let next: T = patch
            .merge_into(&*value)
            .map_err(|reason| StoreError::invalid(T::STORAGE_KEY, reason))?;
        self.commit(&mut value, next)
    }

    /// Replace the whole record and persist.
    pub fn replace(&self, next: T) {
        if let Err(e) = self.try_replace(next) {
            warn!(storage_key = T::STORAGE_KEY, error = %e, "replace rejected");
        }
    }

    pub fn try_replace(&self, next: T) -> Result<(), StoreError> {
        let mut value = write_lock(&self.inner.value);
        self.commit(&mut value, next)
    }

    fn commit(&self, value: &mut T, next: T) -> Result<(), StoreError> {
        next.validate()
            .map_err(|reason| StoreError::invalid(T::STORAGE_KEY, reason))?;
        *value = next;
        self.persist(value);
        self.inner.notifier.notify(T::STORAGE_KEY);
        Ok(())
    }

    /// Re-hydrate if another context changed this store's key since the last
    /// call.
    pub fn sync(&self) -> bool {
        if self.inner.listener.take_pending() == 0 {
            return false;
        }
        debug!(storage_key = T::STORAGE_KEY, "external change, re-hydrating");
        self.hydrate();
        true
    }

    #[cfg(feature = "emitter")]
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.inner.notifier.on_change(listener);
    }
}
