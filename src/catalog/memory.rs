use super::{Catalog, CatalogError};
use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Inventory {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
}

/// Catalog backed by an in-process map.
///
/// Cloning shares the same inventory, so a test can adjust stock levels while
/// a cart actor holds another clone.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<Inventory>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product with its available stock, replacing any previous entry.
    pub async fn insert(&self, product: Product, stock: u32) {
        let mut inventory = self.inner.write().await;
        inventory.stock.insert(product.id, stock);
        inventory.products.insert(product.id, product);
    }

    /// Sets the stock level of a product. Stock may be recorded for an id with
    /// no product metadata.
    pub async fn set_stock(&self, id: ProductId, amount: u32) {
        self.inner.write().await.stock.insert(id, amount);
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let inventory = self.inner.read().await;
        let amount = inventory
            .stock
            .get(&id)
            .copied()
            .ok_or(CatalogError::NotFound(id))?;
        debug!(%id, amount, "Stock lookup");
        Ok(Stock { id, amount })
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let inventory = self.inner.read().await;
        inventory
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
