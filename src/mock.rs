//! # Mocks & Testing Guide
//!
//! Test doubles for every collaborator of the cart actor, so each failure path
//! can be driven deterministically.
//!
//! | Double | Stands in for | Use it to |
//! |--------|---------------|-----------|
//! | [`MockCatalog`] | [`Catalog`] | Script stock and product answers in order, inject errors |
//! | [`RecordingNotifier`] | [`Notifier`] | Assert which notice fired |
//! | [`FailingStorage`] | [`CartStorage`] | Fail reads or writes on demand and count writes |
//! | [`create_mock_client`] | the cart actor | Test [`CartClient`] without spawning an actor |
//!
//! ## Scripting the catalog
//!
//! ```rust
//! use cart_store::catalog::{Catalog, CatalogError};
//! use cart_store::mock::MockCatalog;
//! use cart_store::model::{ProductId, Stock};
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = MockCatalog::new();
//!     catalog.expect_stock(ProductId(1)).return_ok(Stock::new(1, 4));
//!     catalog
//!         .expect_product(ProductId(1))
//!         .return_err(CatalogError::Unavailable("timeout".into()));
//!
//!     assert_eq!(catalog.stock(ProductId(1)).await.unwrap().amount, 4);
//!     assert!(catalog.product(ProductId(1)).await.is_err());
//!
//!     catalog.verify(); // every expectation was consumed
//! }
//! ```
//!
//! Calls must arrive in the scripted order. A call with no matching
//! expectation panics, which fails the test that made it.

use crate::cart_actor::{CartRequest, Notice, NoticeKind, Notifier};
use crate::catalog::{Catalog, CatalogError};
use crate::clients::CartClient;
use crate::model::{Cart, Product, ProductId, Stock};
use crate::storage::{CartStorage, MemoryStorage, StorageError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

// =============================================================================
// CATALOG EXPECTATIONS
// =============================================================================

/// An expected catalog call and the answer to give.
enum Expectation {
    Stock {
        id: ProductId,
        response: Result<Stock, CatalogError>,
    },
    Product {
        id: ProductId,
        response: Result<Product, CatalogError>,
    },
}

/// A catalog that answers from a queue of expectations.
///
/// Clones share the queue: hand one clone to the cart and keep another to
/// call [`verify`](Self::verify).
#[derive(Clone, Default)]
pub struct MockCatalog {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl MockCatalog {
    /// Creates a new mock catalog with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `stock` lookup.
    pub fn expect_stock(&self, id: ProductId) -> StockExpectationBuilder {
        StockExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `product` lookup.
    pub fn expect_product(&self, id: ProductId) -> ProductExpectationBuilder {
        ProductExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Number of expectations not yet consumed.
    pub fn remaining(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn next(&self) -> Option<Expectation> {
        self.expectations.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        match self.next() {
            Some(Expectation::Stock {
                id: expected,
                response,
            }) => {
                assert_eq!(id, expected, "stock lookup for unexpected product");
                response
            }
            Some(Expectation::Product { .. }) => {
                panic!("Unexpected stock({}) call: expected a product lookup", id)
            }
            None => panic!("Unexpected stock({}) call: no expectations left", id),
        }
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        match self.next() {
            Some(Expectation::Product {
                id: expected,
                response,
            }) => {
                assert_eq!(id, expected, "product lookup for unexpected product");
                response
            }
            Some(Expectation::Stock { .. }) => {
                panic!("Unexpected product({}) call: expected a stock lookup", id)
            }
            None => panic!("Unexpected product({}) call: no expectations left", id),
        }
    }
}

/// Builder for `stock` expectations.
pub struct StockExpectationBuilder {
    id: ProductId,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl StockExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, stock: Stock) {
        self.push(Ok(stock));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Stock, CatalogError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Stock {
            id: self.id,
            response,
        });
    }
}

/// Builder for `product` expectations.
pub struct ProductExpectationBuilder {
    id: ProductId,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ProductExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, product: Product) {
        self.push(Ok(product));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Product, CatalogError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Product {
            id: self.id,
            response,
        });
    }
}

// =============================================================================
// NOTIFIER & STORAGE DOUBLES
// =============================================================================

/// Notifier that keeps every notice it receives.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices().iter().map(|n| n.kind).collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// In-memory storage whose reads or writes can be made to fail.
///
/// Counts successful writes so tests can assert that a failed operation
/// never reached storage.
#[derive(Clone, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl FailingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every following write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of writes that reached the underlying storage.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The underlying storage, for re-hydration.
    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }
}

#[async_trait]
impl CartStorage for FailingStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("storage locked".to_string()));
        }
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.inner.write(key, value).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// CLIENT HELPERS
// =============================================================================

/// Creates a cart client and the receiver its requests arrive on.
///
/// The client's snapshot is an empty cart.
pub fn create_mock_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_state, state_rx) = watch::channel(Arc::new(Cart::new()));
    (CartClient::new(sender, state_rx), receiver)
}

/// Waits for the next request sent by a mock client.
pub async fn expect_request(receiver: &mut mpsc::Receiver<CartRequest>) -> Option<CartRequest> {
    receiver.recv().await
}
