//! # Cart Configuration
//!
//! Settings for a cart store. Every field has a default, so a host can embed
//! `CartConfig` in its own config file and only override what it needs.
//!
//! | Field | Env var | Default |
//! |-------|---------|---------|
//! | `storage_key` | `CART_STORAGE_KEY` | `@RocketShoes:cart` |
//! | `buffer_size` | `CART_BUFFER_SIZE` | `32` |
//! | `data_dir` | `CART_DATA_DIR` | unset (in-memory storage) |

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Key the cart snapshot is stored under by default.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Default capacity of the cart actor's request channel.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Namespaced key for the persisted cart.
    pub storage_key: String,
    /// Request queue depth of the cart actor.
    pub buffer_size: usize,
    /// Directory for file-backed storage.
    pub data_dir: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            data_dir: None,
        }
    }
}

impl CartConfig {
    /// Defaults overridden by `CART_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `CART_*` variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup("CART_STORAGE_KEY").filter(|k| !k.is_empty()) {
            config.storage_key = key;
        }

        if let Some(raw) = lookup("CART_BUFFER_SIZE") {
            let invalid = |reason: String| ConfigError::InvalidValue {
                var: "CART_BUFFER_SIZE",
                value: raw.clone(),
                reason,
            };
            let size: usize = raw.trim().parse().map_err(|e| invalid(format!("{}", e)))?;
            if size == 0 {
                return Err(invalid("must be at least 1".to_string()));
            }
            config.buffer_size = size;
        }

        if let Some(dir) = lookup("CART_DATA_DIR").filter(|d| !d.is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }
}
