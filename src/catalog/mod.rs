//! # Catalog & Stock Service
//!
//! The cart never owns product data. Availability and display metadata come
//! from a [`Catalog`], which in a storefront is a remote API. The trait is the
//! seam: the cart actor only ever sees `dyn Catalog`.
//!
//! - [`InMemoryCatalog`] keeps products and stock levels in a map. The demo
//!   binary and the end-to-end tests use it.
//! - [`MockCatalog`](crate::mock::MockCatalog) replays scripted responses, for
//!   tests that need to inject failures at a specific call.

pub mod memory;

pub use memory::*;

use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by a catalog lookup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The catalog has no record for the product.
    #[error("Catalog has no record for {0}")]
    NotFound(ProductId),

    /// The catalog could not be reached or answered with an error.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to product metadata and stock levels.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Current stock record for a product.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;

    /// Display metadata for a product.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}
