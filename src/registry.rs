//! StoreRegistry - the named set of stores sharing one browsing context.
//!
//! Each store exclusively owns its storage key. The registry holds stores
//! type-erased behind [`ManagedStore`], which exposes JSON-level operations
//! for callers that only know a storage key (the admin API, tooling).

use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{read_lock, write_lock, CollectionStore, Patch, Record, Singleton, SingletonStore};

/// Shape of the value a store owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Collection,
    Singleton,
}

/// A store reachable by storage key, with its records as JSON.
///
/// Collection-only operations on a singleton (and the reverse) return
/// `StoreError::Unsupported`.
pub trait ManagedStore: Send + Sync {
    fn storage_key(&self) -> &'static str;

    fn kind(&self) -> StoreKind;

    fn is_ready(&self) -> bool;

    fn hydrate(&self);

    /// Re-hydrate on pending external changes. Returns whether it did.
    fn sync(&self) -> bool;

    /// The whole value: an array for collections, an object for singletons.
    fn snapshot(&self) -> Result<Value, StoreError>;

    /// One collection record by key.
    fn record(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Decode and add a collection record. Returns the stored record.
    fn add_value(&self, value: Value) -> Result<Value, StoreError>;

    /// Update the record keyed `key`, or the singleton when `key` is `None`.
    fn update_value(&self, key: Option<&str>, patch: &Patch) -> Result<bool, StoreError>;

    /// Replace the record keyed `key`, or the singleton when `key` is `None`.
    fn replace_value(&self, key: Option<&str>, value: Value) -> Result<bool, StoreError>;

    fn delete_key(&self, key: &str) -> Result<bool, StoreError>;
}

fn to_json<S: Serialize>(storage_key: &str, value: &S) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::invalid(storage_key, e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(storage_key: &str, value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::invalid(storage_key, e.to_string()))
}

impl<T: Record> ManagedStore for CollectionStore<T> {
    fn storage_key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Collection
    }

    fn is_ready(&self) -> bool {
        CollectionStore::is_ready(self)
    }

    fn hydrate(&self) {
        CollectionStore::hydrate(self)
    }

    fn sync(&self) -> bool {
        CollectionStore::sync(self)
    }

    fn snapshot(&self) -> Result<Value, StoreError> {
        to_json(T::STORAGE_KEY, &self.all())
    }

    fn record(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.get(key)
            .map(|record| to_json(T::STORAGE_KEY, &record))
            .transpose()
    }

    fn add_value(&self, value: Value) -> Result<Value, StoreError> {
        let mut record: T = from_json(T::STORAGE_KEY, value)?;
        record.on_create();
        let stored = to_json(T::STORAGE_KEY, &record)?;
        self.add(record)?;
        Ok(stored)
    }

    fn update_value(&self, key: Option<&str>, patch: &Patch) -> Result<bool, StoreError> {
        let key = key.ok_or_else(|| StoreError::unsupported(T::STORAGE_KEY, "update without a key"))?;
        self.try_update(key, patch)
    }

    fn replace_value(&self, key: Option<&str>, value: Value) -> Result<bool, StoreError> {
        let key = key.ok_or_else(|| StoreError::unsupported(T::STORAGE_KEY, "replace without a key"))?;
        let record: T = from_json(T::STORAGE_KEY, value)?;
        self.try_replace(key, record)
    }

    fn delete_key(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.delete(key))
    }
}

impl<T: Singleton> ManagedStore for SingletonStore<T> {
    fn storage_key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Singleton
    }

    fn is_ready(&self) -> bool {
        SingletonStore::is_ready(self)
    }

    fn hydrate(&self) {
        SingletonStore::hydrate(self)
    }

    fn sync(&self) -> bool {
        SingletonStore::sync(self)
    }

    fn snapshot(&self) -> Result<Value, StoreError> {
        to_json(T::STORAGE_KEY, &self.get())
    }

    fn record(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::unsupported(T::STORAGE_KEY, "record lookup"))
    }

    fn add_value(&self, _value: Value) -> Result<Value, StoreError> {
        Err(StoreError::unsupported(T::STORAGE_KEY, "add"))
    }

    fn update_value(&self, key: Option<&str>, patch: &Patch) -> Result<bool, StoreError> {
        if key.is_some() {
            return Err(StoreError::unsupported(T::STORAGE_KEY, "keyed update"));
        }
        self.try_update(patch)?;
        Ok(true)
    }

    fn replace_value(&self, key: Option<&str>, value: Value) -> Result<bool, StoreError> {
        if key.is_some() {
            return Err(StoreError::unsupported(T::STORAGE_KEY, "keyed replace"));
        }
        self.try_replace(from_json(T::STORAGE_KEY, value)?)?;
        Ok(true)
    }

    fn delete_key(&self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::unsupported(T::STORAGE_KEY, "delete"))
    }
}

/// Registered stores, in registration order.
///
/// Clone-friendly via Arc: clones share the same set of stores.
#[derive(Clone, Default)]
pub struct StoreRegistry {
    stores: Arc<RwLock<Vec<Arc<dyn ManagedStore>>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `store` under its storage key.
    ///
    /// Fails with `StoreError::KeyTaken` if another store owns the key.
    pub fn register<S: ManagedStore + 'static>(&self, store: S) -> Result<(), StoreError> {
        let mut stores = write_lock(&self.stores);
        let storage_key = store.storage_key();
        if stores.iter().any(|existing| existing.storage_key() == storage_key) {
            return Err(StoreError::KeyTaken(storage_key.to_string()));
        }
        debug!(storage_key, "registered store");
        stores.push(Arc::new(store));
        Ok(())
    }

    pub fn get(&self, storage_key: &str) -> Option<Arc<dyn ManagedStore>> {
        read_lock(&self.stores)
            .iter()
            .find(|store| store.storage_key() == storage_key)
            .cloned()
    }

    /// Like [`get`](Self::get), failing with `StoreError::UnknownStore`.
    pub fn require(&self, storage_key: &str) -> Result<Arc<dyn ManagedStore>, StoreError> {
        self.get(storage_key)
            .ok_or_else(|| StoreError::UnknownStore(storage_key.to_string()))
    }

    pub fn keys(&self) -> Vec<&'static str> {
        read_lock(&self.stores)
            .iter()
            .map(|store| store.storage_key())
            .collect()
    }

    pub fn len(&self) -> usize {
        read_lock(&self.stores).len()
    }

    pub fn is_empty(&self) -> bool {
        read_lock(&self.stores).is_empty()
    }

    pub fn hydrate_all(&self) {
        for store in self.snapshot_stores() {
            store.hydrate();
        }
    }

    /// Sync every store. Returns how many re-hydrated.
    pub fn sync_all(&self) -> usize {
        self.snapshot_stores()
            .iter()
            .filter(|store| store.sync())
            .count()
    }

    // Stores run outside the registry lock so a slow hydrate never blocks
    // registration.
    fn snapshot_stores(&self) -> Vec<Arc<dyn ManagedStore>> {
        read_lock(&self.stores).clone()
    }
}
