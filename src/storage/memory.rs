//! MemoryStorage - HashMap-backed storage for tests, previews and degraded mode.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{check_quota, Storage};
use crate::error::StorageError;

/// In-memory storage backed by a HashMap.
///
/// Clone-friendly via Arc: clones share the same items. An optional byte
/// quota mimics browser storage limits, and a disabled instance rejects every
/// operation the way storage does when the user has turned it off.
#[derive(Clone)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
    disabled: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create empty, unlimited storage.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            quota: None,
            disabled: false,
        }
    }

    /// Create empty storage that holds at most `bytes` of keys plus values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Create storage that fails every read and write.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::new()
        }
    }

    fn ensure_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable("storage is disabled".into()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ensure_enabled()?;
        let items = self
            .items
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        let mut items = self
            .items
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        check_quota(self.quota, items.iter(), key, value)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.ensure_enabled()?;
        let mut items = self
            .items
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.ensure_enabled()?;
        let items = self
            .items
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        let mut keys: Vec<String> = items.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
