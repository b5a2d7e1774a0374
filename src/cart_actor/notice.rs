//! User-facing failure notices.
//!
//! The storefront shows a toast for every failed cart operation. The cart
//! actor builds a [`Notice`] from the error and hands it to a [`Notifier`];
//! how it is displayed is up to the host.

use super::CartError;
use crate::model::ProductId;
use std::fmt::Display;
use tracing::warn;

/// The three cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// Wraps an unexpected failure in this operation's generic error variant.
    pub fn failed(self, product_id: ProductId, reason: impl Display) -> CartError {
        let reason = reason.to_string();
        match self {
            Self::Add => CartError::AddFailed { product_id, reason },
            Self::Remove => CartError::RemoveFailed { product_id, reason },
            Self::UpdateAmount => CartError::UpdateFailed { product_id, reason },
        }
    }
}

impl Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Add => "add_item",
            Self::Remove => "remove_item",
            Self::UpdateAmount => "update_amount",
        };
        f.write_str(name)
    }
}

/// Category of a failure, for hosts that style notices differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    OutOfStock,
    NotFound,
    InvalidAmount,
    Failed,
}

impl From<&CartError> for NoticeKind {
    fn from(error: &CartError) -> Self {
        match error {
            CartError::OutOfStock { .. } => Self::OutOfStock,
            CartError::NotFound(_) => Self::NotFound,
            CartError::InvalidAmount { .. } => Self::InvalidAmount,
            _ => Self::Failed,
        }
    }
}

/// A human-readable failure message plus the context it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub operation: CartOperation,
    pub product_id: ProductId,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn from_error(operation: CartOperation, product_id: ProductId, error: &CartError) -> Self {
        let kind = NoticeKind::from(error);
        let message = match (kind, operation) {
            (NoticeKind::OutOfStock, _) => "Requested quantity is out of stock",
            (_, CartOperation::Add) => "Error adding product",
            (_, CartOperation::Remove) => "Error removing product",
            (_, CartOperation::UpdateAmount) => "Error changing product quantity",
        };
        Self {
            operation,
            product_id,
            kind,
            message: message.to_string(),
        }
    }
}

/// Sink for failure notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that emits every notice as a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(
            operation = %notice.operation,
            product_id = %notice.product_id,
            kind = ?notice.kind,
            "{}",
            notice.message
        );
    }
}
