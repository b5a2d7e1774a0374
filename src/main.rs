//! # Cart Store Demo
//!
//! Seeds an in-memory catalog, starts a [`CartSystem`] and walks through the
//! cart operations, including the failures a shopper can trigger.
//!
//! Storage is a directory when `CART_DATA_DIR` is set, so running the demo
//! twice shows the cart being hydrated; otherwise it lives in memory.

use cart_store::cart_actor::TracingNotifier;
use cart_store::catalog::InMemoryCatalog;
use cart_store::config::CartConfig;
use cart_store::lifecycle::{setup_tracing, CartSystem};
use cart_store::model::{Product, ProductId};
use cart_store::storage::{CartStorage, FileStorage, MemoryStorage};
use std::sync::Arc;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = CartConfig::from_env()?;
    info!(?config, "Starting cart demo");

    let catalog = InMemoryCatalog::new();
    catalog
        .insert(Product::new(1, "Tênis de Caminhada Leve Confortável", 179.9, "https://images/1.jpg"), 3)
        .await;
    catalog
        .insert(Product::new(2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, "https://images/2.jpg"), 5)
        .await;
    catalog
        .insert(Product::new(3, "Tênis Adidas Duramo Lite 2.0", 219.9, "https://images/3.jpg"), 1)
        .await;

    let storage: Arc<dyn CartStorage> = match &config.data_dir {
        Some(dir) => Arc::new(FileStorage::new(dir)),
        None => Arc::new(MemoryStorage::new()),
    };

    let system = CartSystem::start(
        &config,
        Arc::new(catalog),
        storage,
        Arc::new(TracingNotifier),
    )
    .await?;
    let cart = system.cart_client.clone();

    let hydrated = cart.snapshot();
    info!(items = hydrated.len(), units = hydrated.item_count(), "Cart hydrated");

    let span = tracing::info_span!("shopping");
    async {
        for id in [1, 2, 1, 3] {
            if let Err(e) = cart.add_item(ProductId(id)).await {
                error!(error = %e, "Add rejected");
            }
        }

        // Only one unit of product 3 exists
        if let Err(e) = cart.add_item(ProductId(3)).await {
            info!(error = %e, "Second unit of product 3 rejected as expected");
        }

        if let Err(e) = cart.update_amount(ProductId(2), 4).await {
            error!(error = %e, "Update rejected");
        }
        if let Err(e) = cart.update_amount(ProductId(2), 0).await {
            info!(error = %e, "Zero amount rejected as expected");
        }

        if let Err(e) = cart.remove_item(ProductId(3)).await {
            error!(error = %e, "Remove rejected");
        }
        if let Err(e) = cart.remove_item(ProductId(42)).await {
            info!(error = %e, "Removing an absent product rejected as expected");
        }
    }
    .instrument(span)
    .await;

    let final_cart = cart.snapshot();
    for item in final_cart.iter() {
        info!(id = %item.id, title = %item.title, amount = item.amount, "Line item");
    }
    info!(
        items = final_cart.len(),
        units = final_cart.item_count(),
        subtotal = final_cart.subtotal(),
        "Final cart"
    );

    drop(cart);
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
