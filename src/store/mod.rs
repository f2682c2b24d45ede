//! Content stores - typed CRUD over one storage key each.
//!
//! A store owns exactly one storage key. It seeds defaults on first access,
//! persists the full value synchronously on every mutation, and re-hydrates
//! when another browsing context changes its key.
//!
//! ## Example
//!
//! ```ignore
//! use content_store::{CollectionStore, Record, StorageArea};
//!
//! #[derive(Clone, Serialize, Deserialize, Record)]
//! #[record(storage_key = "services", defaults = "seed_services")]
//! struct Service {
//!     #[record(key)]
//!     pub slug: String,
//!     pub title: String,
//! }
//!
//! let area = StorageArea::in_memory();
//! let services = CollectionStore::<Service>::open(&area.open_context());
//! services.add(service)?;
//! let loaded = services.get("seo");
//! ```

mod collection;
mod notify;
mod patch;
mod singleton;

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

pub use collection::CollectionStore;
pub use patch::{shallow_merge, Patch, PatchError};
pub use singleton::SingletonStore;

/// How `update` treats the value it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// The patch is the complete replacement record.
    Replace,
    /// The patch's fields are shallow-merged over the existing record.
    Merge,
}

/// What `add` does when the key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Accept the record; lookups return the first match in sequence order.
    Allow,
    /// Refuse the record with `StoreError::DuplicateKey`.
    Reject,
}

/// Trait for types stored as records of a collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Storage key the whole collection is persisted under.
    const STORAGE_KEY: &'static str;

    const UPDATE_MODE: UpdateMode = UpdateMode::Replace;

    const DUPLICATES: DuplicatePolicy = DuplicatePolicy::Allow;

    /// The record's identity within its collection (e.g. a slug or id).
    fn key(&self) -> &str;

    /// Seed data written on first access.
    fn defaults() -> Vec<Self> {
        Vec::new()
    }

    /// Schema rule checked at the storage boundary.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Fill generated fields (ids, timestamps) of a record submitted without
    /// them. Runs on creation only, never when loading stored records.
    fn on_create(&mut self) {}
}

/// Trait for types stored as a single record under one key.
pub trait Singleton: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const STORAGE_KEY: &'static str;

    /// Seed value, also the base that stored fields are merged over.
    fn default_value() -> Self;

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Validate every record and, under `Reject`, key uniqueness.
pub(crate) fn check_records<T: Record>(records: &[T]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for record in records {
        record
            .validate()
            .map_err(|reason| format!("record {}: {}", record.key(), reason))?;
        if T::DUPLICATES == DuplicatePolicy::Reject && !seen.insert(record.key()) {
            return Err(format!("duplicate key {}", record.key()));
        }
    }
    Ok(())
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
