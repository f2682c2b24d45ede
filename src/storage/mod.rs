//! Storage - the local key-value medium content stores persist into.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              BrowsingContext (one per "tab")                 │
//! │  get_item / set_item / remove_item / subscribe(key)          │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 StorageArea (shared)                          │
//! │  - Storage backend (string keys → string values)             │
//! │  - ChangeFeed: StorageEvent fan-out to *other* contexts      │
//! └─────────────────────────────────────────────────────────────┘
//!          │                                   │
//!          ▼                                   ▼
//! ┌─────────────────┐                ┌─────────────────────┐
//! │  MemoryStorage  │                │     FileStorage     │
//! │ (quota/disabled)│                │ (atomic JSON file)  │
//! └─────────────────┘                └─────────────────────┘
//! ```

mod area;
mod bundle;
mod feed;
mod file;
mod memory;

use crate::error::StorageError;

pub use area::{BrowsingContext, StorageArea};
pub use bundle::{BundleError, ContentBundle};
pub use feed::{ContextId, StorageEvent, Subscription};
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A string-keyed, string-valued storage backend.
///
/// Implementations must be cheap to share across threads; every write is a
/// full overwrite of the key's value.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`. Returns None if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// All keys currently stored, in ascending order.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Fail with `QuotaExceeded` if storing `value` under `key` would push the
/// total size (keys plus values, in bytes) above `quota`.
pub(crate) fn check_quota<'a>(
    quota: Option<usize>,
    entries: impl Iterator<Item = (&'a String, &'a String)>,
    key: &str,
    value: &str,
) -> Result<(), StorageError> {
    let Some(quota) = quota else {
        return Ok(());
    };

    let others: usize = entries
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum();
    let needed = others + key.len() + value.len();

    if needed > quota {
        return Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            needed,
            quota,
        });
    }
    Ok(())
}
