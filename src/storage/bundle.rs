//! Content bundles - a portable snapshot of a whole storage area.
//!
//! The bundle is bitcode-encoded and wrapped in standard base64 so it can be
//! pasted between environments as plain text.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error when encoding or decoding a bundle token.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("bundle encoding error: {0}")]
    Encoding(#[from] bitcode::Error),
    #[error("bundle token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Every storage key and its raw value at the time of export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub entries: BTreeMap<String, String>,
}

impl ContentBundle {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Encode as a base64 text token.
    pub fn to_token(&self) -> Result<String, BundleError> {
        let bytes = bitcode::serialize(self)?;
        Ok(STANDARD.encode(bytes))
    }

    /// Decode a token produced by [`ContentBundle::to_token`].
    pub fn from_token(token: &str) -> Result<Self, BundleError> {
        let bytes = STANDARD.decode(token.trim())?;
        Ok(bitcode::deserialize(&bytes)?)
    }
}
