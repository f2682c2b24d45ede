//! Storage configuration, loaded from the environment or built in code.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::storage::{FileStorage, MemoryStorage, StorageArea};

pub const PATH_ENV: &str = "CONTENT_STORE_PATH";
pub const QUOTA_ENV: &str = "CONTENT_STORE_QUOTA";
pub const SYNC_MS_ENV: &str = "CONTENT_STORE_SYNC_MS";

/// Browser local storage allows roughly 5 MiB per origin.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Where content is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    pub backend: Backend,
    /// Byte quota over all keys and values; `None` is unlimited.
    pub quota_bytes: Option<usize>,
    /// Interval for the background sync thread.
    pub sync_interval: Duration,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}

impl ContentConfig {
    /// Read `CONTENT_STORE_PATH`, `CONTENT_STORE_QUOTA` (bytes, `0` for
    /// unlimited) and `CONTENT_STORE_SYNC_MS`. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = non_empty(lookup(PATH_ENV)) {
            config.backend = Backend::File(PathBuf::from(path));
        }
        if let Some(quota) = non_empty(lookup(QUOTA_ENV)) {
            config.quota_bytes = match parse_number::<usize>(QUOTA_ENV, &quota)? {
                0 => None,
                bytes => Some(bytes),
            };
        }
        if let Some(ms) = non_empty(lookup(SYNC_MS_ENV)) {
            config.sync_interval = Duration::from_millis(parse_number::<u64>(SYNC_MS_ENV, &ms)?);
        }

        Ok(config)
    }

    pub fn memory() -> Self {
        Self::default()
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File(path.into()),
            ..Self::default()
        }
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    pub fn unlimited(mut self) -> Self {
        self.quota_bytes = None;
        self
    }

    pub fn with_sync_interval(mut self, interval: Duration) -> Self {
        self.sync_interval = interval;
        self
    }

    /// Open the configured storage area. A file that cannot be opened falls
    /// back to memory storage with a warning, as a browser without usable
    /// local storage still renders.
    pub fn open_area(&self) -> StorageArea {
        match &self.backend {
            Backend::Memory => StorageArea::new(self.memory_storage()),
            Backend::File(path) => match FileStorage::open(path) {
                Ok(storage) => {
                    info!(path = %path.display(), "opened content file");
                    let storage = match self.quota_bytes {
                        Some(bytes) => storage.with_quota(bytes),
                        None => storage,
                    };
                    StorageArea::new(storage)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "content file unavailable, using memory storage");
                    StorageArea::new(self.memory_storage())
                }
            },
        }
    }

    fn memory_storage(&self) -> MemoryStorage {
        match self.quota_bytes {
            Some(bytes) => MemoryStorage::with_quota(bytes),
            None => MemoryStorage::new(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Values that overflow the target type are rejected, not truncated.
fn parse_number<N: FromStr>(var: &'static str, value: &str) -> Result<N, ConfigError> {
    value.parse::<N>().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}
