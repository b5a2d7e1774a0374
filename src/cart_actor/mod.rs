//! # Cart Actor
//!
//! Stock-aware cart mutations with persistence on every commit.
//!
//! ## Structure
//!
//! - [`actor`] - [`CartActor`], the owning task, and [`CartContext`], its collaborators
//! - [`message`] - [`CartRequest`] sent by the client
//! - [`error`] - [`CartError`] for type-safe error handling
//! - [`notice`] - [`Notice`] and the [`Notifier`] sink for user-facing failures
//! - [`new()`] - Factory function that creates the actor and client from a [`CartConfig`]
//!
//! ## Operations
//!
//! | Operation | Catalog calls | Fails with |
//! |-----------|---------------|------------|
//! | `add_item(id)` | stock, then product if new | `OutOfStock`, `AddFailed` |
//! | `remove_item(id)` | none | `NotFound`, `RemoveFailed` |
//! | `update_amount(id, n)` | stock (skipped when `n < 1`) | `InvalidAmount`, `OutOfStock`, `NotFound`, `UpdateFailed` |
//!
//! ## Usage
//!
//! ```rust
//! use cart_store::cart_actor::{self, CartContext, TracingNotifier};
//! use cart_store::catalog::InMemoryCatalog;
//! use cart_store::config::CartConfig;
//! use cart_store::model::{Cart, Product, ProductId};
//! use cart_store::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = InMemoryCatalog::new();
//!     catalog.insert(Product::new(5, "Tênis VR Caminhada", 139.9, "vr.jpg"), 3).await;
//!
//!     let (actor, client) = cart_actor::new(&CartConfig::default(), Cart::new());
//!     tokio::spawn(actor.run(CartContext {
//!         catalog: Arc::new(catalog),
//!         storage: Arc::new(MemoryStorage::new()),
//!         notifier: Arc::new(TracingNotifier),
//!     }));
//!
//!     let cart = client.add_item(ProductId(5)).await?;
//!     assert_eq!(cart.get(ProductId(5)).map(|item| item.amount), Some(1));
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod error;
pub mod message;
pub mod notice;

pub use actor::*;
pub use error::*;
pub use message::*;
pub use notice::*;

use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::model::Cart;

/// Creates a new Cart actor holding `initial`, and its client.
pub fn new(config: &CartConfig, initial: Cart) -> (CartActor, CartClient) {
    CartActor::new(config.buffer_size, config.storage_key.clone(), initial)
}
