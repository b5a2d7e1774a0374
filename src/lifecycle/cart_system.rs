use crate::cart_actor::{self, CartContext, Notifier};
use crate::catalog::Catalog;
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::storage::{load_cart, CartStorage, StorageError};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for a cart store.
///
/// `CartSystem` is responsible for:
/// - **Hydration**: Reading the persisted cart before the actor starts
/// - **Dependency Wiring**: Handing the catalog, storage and notifier to the actor
/// - **Lifecycle Management**: Spawning the actor and awaiting it on shutdown
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::start(&config, catalog, storage, notifier).await?;
///
/// // Hand clones of the client to whatever renders the cart
/// let cart = system.cart_client.add_item(ProductId(1)).await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Task handle for the running actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Hydrates the cart from `storage` and starts the cart actor.
    ///
    /// Fails without starting anything when the storage backend cannot be
    /// read, so the snapshot it holds is never overwritten by an empty cart.
    pub async fn start(
        config: &CartConfig,
        catalog: Arc<dyn Catalog>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorageError> {
        let initial = load_cart(storage.as_ref(), &config.storage_key).await?;
        info!(items = initial.len(), "Starting cart store");

        let (actor, cart_client) = cart_actor::new(config, initial);
        let handle = tokio::spawn(actor.run(CartContext {
            catalog,
            storage,
            notifier,
        }));

        Ok(Self {
            cart_client,
            handle,
        })
    }

    /// Gracefully shuts down the cart store.
    ///
    /// Drops this system's client and waits for the actor to finish. The actor
    /// exits once every clone of the client is gone, so outstanding clones
    /// delay the return.
    ///
    /// Returns the join error if the actor task panicked.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down cart store...");

        // Dropping the last sender closes the channel; the actor's recv() returns None.
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Cart actor task failed: {:?}", e);
            return Err(e);
        }

        info!("Cart store shutdown complete.");
        Ok(())
    }
}
