//! Cart configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Storage key of the persisted cart record.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Shop number that receives checkout messages.
pub const DEFAULT_CHECKOUT_PHONE: &str = "573135198690";

/// Configuration for a [`CartStore`](crate::CartStore).
///
/// Every field has a default, so a config file only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key the cart record is stored under
    pub storage_key: String,
    /// International number (no `+`) for the checkout link
    pub checkout_phone: String,
    /// Send a notification after each successful add
    pub notify: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            checkout_phone: DEFAULT_CHECKOUT_PHONE.to_string(),
            notify: true,
        }
    }
}

impl StoreConfig {
    /// Parse a JSON config document.
    pub fn from_json(bytes: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_json(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.checkout_phone, DEFAULT_CHECKOUT_PHONE);
        assert!(config.notify);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = StoreConfig::from_json(br#"{"checkout_phone":"571234"}"#).unwrap();
        assert_eq!(config.checkout_phone, "571234");
        assert_eq!(config.storage_key, "cart");
        assert!(config.notify);
    }

    #[test]
    fn test_invalid_document() {
        let err = StoreConfig::from_json(b"notify = false").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = StoreConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
