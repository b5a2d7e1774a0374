//! # Cart Client
//!
//! Provides a high-level API for interacting with the cart actor.
//! It wraps the actor's request sender and the watch receiver carrying the
//! committed cart.
use crate::cart_actor::{CartError, CartRequest, Response};
use crate::model::{Cart, ProductId};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

/// Handle to a running cart store.
///
/// * **Cloneable** - holds a sender and a watch receiver, so cloning is inexpensive.
/// * **Async mutations** - each resolves once the actor has committed or rejected the change.
/// * **Sync reads** - [`snapshot`](Self::snapshot) returns the latest committed cart without a round trip.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    state: watch::Receiver<Arc<Cart>>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, state: watch::Receiver<Arc<Cart>>) -> Self {
        Self { sender, state }
    }

    /// Adds one unit of a product, appending it if it is not yet in the cart.
    ///
    /// Returns the committed cart, or `OutOfStock` / `AddFailed`.
    #[instrument(skip(self))]
    pub async fn add_item(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::Add {
            product_id,
            respond_to,
        })
        .await
    }

    /// Removes a product from the cart.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::Remove {
            product_id,
            respond_to,
        })
        .await
    }

    /// Sets the amount of a product already in the cart.
    ///
    /// The amount is absolute, not an increment.
    #[instrument(skip(self))]
    pub async fn update_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Arc<Cart>, CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::UpdateAmount {
            product_id,
            amount,
            respond_to,
        })
        .await
    }

    /// The latest committed cart.
    pub fn snapshot(&self) -> Arc<Cart> {
        self.state.borrow().clone()
    }

    /// A receiver that observes every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        let mut receiver = self.state.clone();
        receiver.mark_unchanged();
        receiver
    }

    async fn request(
        &self,
        build: impl FnOnce(Response<Arc<Cart>>) -> CartRequest,
    ) -> Result<Arc<Cart>, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| CartError::StoreClosed)?;
        response.await.map_err(|_| CartError::StoreDropped)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{create_mock_client, expect_request};
    use crate::model::{LineItem, Product};

    fn one_item_cart(id: u32, amount: u32) -> Arc<Cart> {
        let item = LineItem::from_product(Product::new(id, "Tênis", 99.9, "t.jpg"), amount);
        Arc::new(Cart::from_items(vec![item]).unwrap())
    }

    #[tokio::test]
    async fn test_add_item_sends_request() {
        let (client, mut receiver) = create_mock_client(10);

        let add_task = tokio::spawn(async move { client.add_item(ProductId(5)).await });

        let request = expect_request(&mut receiver)
            .await
            .expect("Expected Add request");
        match request {
            CartRequest::Add {
                product_id,
                respond_to,
            } => {
                assert_eq!(product_id, ProductId(5));
                respond_to.send(Ok(one_item_cart(5, 1))).unwrap();
            }
            other => panic!("Expected Add request, got {:?}", other),
        }

        let cart = add_task.await.unwrap().unwrap();
        assert_eq!(cart.get(ProductId(5)).unwrap().amount, 1);
    }

    #[tokio::test]
    async fn test_update_amount_passes_error_through() {
        let (client, mut receiver) = create_mock_client(10);

        let update_task =
            tokio::spawn(async move { client.update_amount(ProductId(2), 0).await });

        match expect_request(&mut receiver).await {
            Some(CartRequest::UpdateAmount {
                product_id,
                amount,
                respond_to,
            }) => {
                assert_eq!(amount, 0);
                respond_to
                    .send(Err(CartError::InvalidAmount { product_id, amount }))
                    .unwrap();
            }
            other => panic!("Expected UpdateAmount request, got {:?}", other),
        }

        let result = update_task.await.unwrap();
        assert_eq!(
            result,
            Err(CartError::InvalidAmount {
                product_id: ProductId(2),
                amount: 0
            })
        );
    }

    #[tokio::test]
    async fn test_closed_store() {
        let (client, receiver) = create_mock_client(1);
        drop(receiver);

        assert_eq!(
            client.remove_item(ProductId(1)).await,
            Err(CartError::StoreClosed)
        );
    }

    #[tokio::test]
    async fn test_dropped_response() {
        let (client, mut receiver) = create_mock_client(1);

        let remove_task = tokio::spawn(async move { client.remove_item(ProductId(1)).await });
        let request = expect_request(&mut receiver).await.expect("Expected request");
        drop(request);

        assert_eq!(remove_task.await.unwrap(), Err(CartError::StoreDropped));
    }

    #[tokio::test]
    async fn test_snapshot_of_mock_is_empty() {
        let (client, _receiver) = create_mock_client(1);
        assert!(client.snapshot().is_empty());
    }
}
