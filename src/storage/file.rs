//! FileStorage - one JSON document on disk, replaced atomically on every write.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{check_quota, Storage};
use crate::error::StorageError;

/// Durable storage persisted as a single JSON object mapping keys to values.
///
/// Reads are served from an in-memory copy loaded at open. Every write
/// serializes the full map to a temp file in the same directory and renames
/// it over the target, so a crash never leaves a half-written document.
/// A failed write leaves both the file and the in-memory copy unchanged.
#[derive(Clone)]
pub struct FileStorage {
    path: PathBuf,
    items: Arc<RwLock<BTreeMap<String, String>>>,
    quota: Option<usize>,
}

impl FileStorage {
    /// Open (or create on first write) the storage file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let items = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    StorageError::Corrupt(format!("{}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = items.len(), "opened file storage");

        Ok(Self {
            path,
            items: Arc::new(RwLock::new(items)),
            quota: None,
        })
    }

    /// Limit total stored bytes (keys plus values).
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, items)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self
            .items
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        check_quota(self.quota, items.iter(), key, value)?;

        let mut next = items.clone();
        next.insert(key.to_string(), value.to_string());
        self.write_file(&next)?;
        *items = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StorageError::LockPoisoned("write"))?;
        if !items.contains_key(key) {
            return Ok(());
        }

        let mut next = items.clone();
        next.remove(key);
        self.write_file(&next)?;
        *items = next;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let items = self
            .items
            .read()
            .map_err(|_| StorageError::LockPoisoned("read"))?;
        Ok(items.keys().cloned().collect())
    }
}
