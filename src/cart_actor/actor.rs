//! # Cart Actor
//!
//! The single owner of the cart. It processes requests one at a time, so an
//! operation that awaits the catalog finishes before the next one starts and
//! no two mutations interleave.
//!
//! ## Commit
//!
//! Handlers never touch the published cart. They build the next [`Cart`]
//! from the current snapshot and return it; only then does the actor commit:
//!
//! 1. Write the full snapshot to storage.
//! 2. Publish it on the watch channel as the new current cart.
//!
//! A failure at any step before publishing, including a failed storage write,
//! leaves the previous cart in place and fires a [`Notice`].

use super::message::CartRequest;
use super::notice::{CartOperation, Notice, Notifier};
use super::CartError;
use crate::catalog::Catalog;
use crate::clients::CartClient;
use crate::model::{Cart, LineItem, ProductId};
use crate::storage::{save_cart, CartStorage};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Collaborators injected into [`CartActor::run`].
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<dyn Catalog>,
    pub storage: Arc<dyn CartStorage>,
    pub notifier: Arc<dyn Notifier>,
}

/// Server half of the cart store.
///
/// Owns the receiver end of the request channel and the sender end of the
/// state channel. The current cart lives in the watch channel, which is what
/// [`CartClient::snapshot`] reads.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    state: watch::Sender<Arc<Cart>>,
    storage_key: String,
}

impl CartActor {
    /// Creates a new `CartActor` holding `initial` and its associated `CartClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. A value of 0 is raised to 1.
    /// * `storage_key` - Key the cart snapshot is written under.
    /// * `initial` - The hydrated cart.
    pub fn new(buffer_size: usize, storage_key: impl Into<String>, initial: Cart) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let (state, state_rx) = watch::channel(Arc::new(initial));
        let actor = Self {
            receiver,
            state,
            storage_key: storage_key.into(),
        };
        let client = CartClient::new(sender, state_rx);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: CartContext) {
        info!(key = %self.storage_key, items = self.current().len(), "Cart actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::Add {
                    product_id,
                    respond_to,
                } => {
                    debug!(%product_id, "Add");
                    let next = Self::add_item(self.current(), product_id, &context).await;
                    let result = self
                        .settle(CartOperation::Add, product_id, next, &context)
                        .await;
                    let _ = respond_to.send(result);
                }
                CartRequest::Remove {
                    product_id,
                    respond_to,
                } => {
                    debug!(%product_id, "Remove");
                    let next = self.remove_item(product_id);
                    let result = self
                        .settle(CartOperation::Remove, product_id, next, &context)
                        .await;
                    let _ = respond_to.send(result);
                }
                CartRequest::UpdateAmount {
                    product_id,
                    amount,
                    respond_to,
                } => {
                    debug!(%product_id, amount, "UpdateAmount");
                    let next =
                        Self::update_amount(self.current(), product_id, amount, &context).await;
                    let result = self
                        .settle(CartOperation::UpdateAmount, product_id, next, &context)
                        .await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(items = self.current().len(), "Cart actor shutdown");
    }

    fn current(&self) -> Arc<Cart> {
        self.state.borrow().clone()
    }

    async fn add_item(
        current: Arc<Cart>,
        product_id: ProductId,
        ctx: &CartContext,
    ) -> Result<Cart, CartError> {
        let existing = current.get(product_id).map(|item| item.amount);

        let stock = ctx
            .catalog
            .stock(product_id)
            .await
            .map_err(|e| CartOperation::Add.failed(product_id, e))?;

        let requested = i64::from(existing.unwrap_or(0)) + 1;
        let out_of_stock = || CartError::OutOfStock {
            product_id,
            requested,
            available: stock.amount,
        };
        if !stock.covers(requested) {
            return Err(out_of_stock());
        }
        let amount = u32::try_from(requested).map_err(|_| out_of_stock())?;

        if existing.is_some() {
            return current
                .with_amount(product_id, amount)
                .ok_or(CartError::NotFound(product_id));
        }

        let product = ctx
            .catalog
            .product(product_id)
            .await
            .map_err(|e| CartOperation::Add.failed(product_id, e))?;
        let item = LineItem {
            id: product_id,
            ..LineItem::from_product(product, amount)
        };
        Ok(current.with_appended(item))
    }

    fn remove_item(&self, product_id: ProductId) -> Result<Cart, CartError> {
        self.current()
            .without(product_id)
            .ok_or(CartError::NotFound(product_id))
    }

    async fn update_amount(
        current: Arc<Cart>,
        product_id: ProductId,
        amount: i64,
        ctx: &CartContext,
    ) -> Result<Cart, CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount { product_id, amount });
        }

        let stock = ctx
            .catalog
            .stock(product_id)
            .await
            .map_err(|e| CartOperation::UpdateAmount.failed(product_id, e))?;

        let out_of_stock = || CartError::OutOfStock {
            product_id,
            requested: amount,
            available: stock.amount,
        };
        if !stock.covers(amount) {
            return Err(out_of_stock());
        }
        let amount = u32::try_from(amount).map_err(|_| out_of_stock())?;

        current
            .with_amount(product_id, amount)
            .ok_or(CartError::NotFound(product_id))
    }

    /// Commits a successful outcome, or reports a failed one.
    async fn settle(
        &mut self,
        operation: CartOperation,
        product_id: ProductId,
        next: Result<Cart, CartError>,
        ctx: &CartContext,
    ) -> Result<Arc<Cart>, CartError> {
        let outcome = match next {
            Ok(cart) => self.commit(operation, product_id, cart, ctx).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &outcome {
            warn!(%operation, %product_id, error = %e, "Cart operation failed");
            ctx.notifier
                .notify(Notice::from_error(operation, product_id, e));
        }
        outcome
    }

    async fn commit(
        &mut self,
        operation: CartOperation,
        product_id: ProductId,
        cart: Cart,
        ctx: &CartContext,
    ) -> Result<Arc<Cart>, CartError> {
        save_cart(ctx.storage.as_ref(), &self.storage_key, &cart)
            .await
            .map_err(|e| operation.failed(product_id, e))?;

        let cart = Arc::new(cart);
        self.state.send_replace(cart.clone());
        info!(%operation, %product_id, items = cart.len(), units = cart.item_count(), "Committed");
        Ok(cart)
    }
}
