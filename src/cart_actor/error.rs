//! Error types for the Cart actor.

use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// Every variant leaves the cart exactly as it was before the request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// The product is not in the cart.
    #[error("{0} is not in the cart")]
    NotFound(ProductId),

    /// The requested amount is below 1.
    #[error("Invalid amount for {product_id}: {amount}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    /// Adding failed for a reason other than stock (catalog or storage failure).
    #[error("Failed to add {product_id}: {reason}")]
    AddFailed {
        product_id: ProductId,
        reason: String,
    },

    /// Changing the amount failed for a reason other than validation.
    #[error("Failed to update {product_id}: {reason}")]
    UpdateFailed {
        product_id: ProductId,
        reason: String,
    },

    /// Removing failed while persisting the new cart.
    #[error("Failed to remove {product_id}: {reason}")]
    RemoveFailed {
        product_id: ProductId,
        reason: String,
    },

    /// The cart actor is no longer running.
    #[error("Cart store closed")]
    StoreClosed,

    /// The cart actor dropped the request without answering.
    #[error("Cart store dropped response channel")]
    StoreDropped,
}
