//! # Cart Messages
//!
//! Requests sent from a [`CartClient`](crate::clients::CartClient) to the
//! [`CartActor`](super::CartActor). Each carries a oneshot sender for the reply.

use super::CartError;
use crate::model::{Cart, ProductId};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, CartError>>;

/// Mutation requests. A successful reply carries the committed cart.
#[derive(Debug)]
pub enum CartRequest {
    Add {
        product_id: ProductId,
        respond_to: Response<Arc<Cart>>,
    },
    Remove {
        product_id: ProductId,
        respond_to: Response<Arc<Cart>>,
    },
    UpdateAmount {
        product_id: ProductId,
        amount: i64,
        respond_to: Response<Arc<Cart>>,
    },
}
