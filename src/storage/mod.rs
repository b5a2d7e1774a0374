//! # Cart Persistence
//!
//! The cart survives reloads by writing a full JSON snapshot under a fixed key
//! after every committed change, and reading it back once at startup.
//!
//! Backends implement [`CartStorage`], a plain string key-value store:
//!
//! - [`MemoryStorage`] - in-process map, shared between clones (browser local storage).
//! - [`FileStorage`] - one file per key in a directory, written via temp file + rename.
//!
//! [`load_cart`] and [`save_cart`] sit on top and own the JSON format.

pub mod file;
pub mod memory;

pub use file::*;
pub use memory::*;

use crate::model::Cart;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cart serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// String key-value persistence for cart snapshots.
///
/// Writes are full overwrites of the previous value.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Reads the value under `key`, or `None` when nothing was stored.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key`.
    async fn write(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// Hydrates the cart stored under `key`.
///
/// A missing value, or a value that is not a well-formed cart, yields an empty
/// cart. The bad value stays in storage until the next commit overwrites it.
///
/// A backend that cannot be read is an error: the stored snapshot may still be
/// valid, and starting empty would overwrite it on the first commit.
pub async fn load_cart(storage: &dyn CartStorage, key: &str) -> Result<Cart, StorageError> {
    let raw = match storage.read(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored cart");
            return Ok(Cart::new());
        }
        Err(e) => {
            error!(key, error = %e, "Failed to read stored cart");
            return Err(e);
        }
    };

    match decode_cart(&raw) {
        Ok(cart) => {
            debug!(key, items = cart.len(), "Hydrated cart");
            Ok(cart)
        }
        Err(reason) => {
            warn!(key, %reason, "Ignoring malformed stored cart");
            Ok(Cart::new())
        }
    }
}

/// Writes a full snapshot of `cart` under `key`.
pub async fn save_cart(storage: &dyn CartStorage, key: &str, cart: &Cart) -> Result<(), StorageError> {
    let raw = serde_json::to_string(cart)?;
    storage.write(key, raw).await
}

fn decode_cart(raw: &str) -> Result<Cart, String> {
    let cart: Cart = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    cart.validate().map_err(|e| e.to_string())?;
    Ok(cart)
}
