//! The cart and its line items.
//!
//! [`Cart`] is an immutable value: every mutation helper returns a new cart and
//! leaves `self` untouched. The cart actor builds the next cart with these
//! helpers and only commits it once the whole operation has succeeded.

use crate::model::{Product, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// One product entry in the cart with its ordered quantity.
///
/// Product attributes are copied from the catalog when the item is first added
/// so the cart renders without further lookups. Attributes beyond the known
/// ones live in `extra` and are written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    /// Builds a line item from catalog metadata.
    pub fn from_product(product: Product, amount: u32) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
            extra: product.extra,
        }
    }

    /// Price of this line (`price * amount`).
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Reasons a list of line items is not a valid cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartShapeError {
    #[error("Line item {0} has amount 0")]
    ZeroAmount(ProductId),

    #[error("Line item {0} appears more than once")]
    DuplicateItem(ProductId),
}

/// Ordered collection of line items, at most one per product.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from existing line items, rejecting zero amounts and
    /// duplicate products.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartShapeError> {
        let cart = Self { items };
        cart.validate()?;
        Ok(cart)
    }

    /// Checks the cart invariants: every amount is at least 1 and no product
    /// appears twice.
    pub fn validate(&self) -> Result<(), CartShapeError> {
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.amount == 0 {
                return Err(CartShapeError::ZeroAmount(item.id));
            }
            if !seen.insert(item.id) {
                return Err(CartShapeError::DuplicateItem(item.id));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of every line total.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Returns a copy of the cart with `item` appended at the end.
    ///
    /// The caller guarantees `item.id` is not already present.
    pub fn with_appended(&self, item: LineItem) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(item);
        Self { items }
    }

    /// Returns a copy of the cart with the amount of `id` replaced, or `None`
    /// if the product is not in the cart.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    LineItem {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Some(Self { items })
    }

    /// Returns a copy of the cart without `id`, or `None` if the product is not
    /// in the cart. Remaining items keep their order.
    pub fn without(&self, id: ProductId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Some(Self { items })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, amount: u32) -> LineItem {
        LineItem::from_product(
            Product::new(id, format!("Sneaker {}", id), 100.0 + f64::from(id), "img.png"),
            amount,
        )
    }

    #[test]
    fn test_with_appended_leaves_source_untouched() {
        let cart = Cart::from_items(vec![item(1, 1)]).unwrap();
        let next = cart.with_appended(item(2, 1));

        assert_eq!(cart.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next.items()[1].id, ProductId(2));
    }

    #[test]
    fn test_with_amount_sets_exact_value() {
        let cart = Cart::from_items(vec![item(1, 1), item(2, 3)]).unwrap();
        let next = cart.with_amount(ProductId(2), 5).expect("item present");

        assert_eq!(next.get(ProductId(2)).unwrap().amount, 5);
        assert_eq!(next.get(ProductId(1)).unwrap().amount, 1);
        // Original snapshot is untouched
        assert_eq!(cart.get(ProductId(2)).unwrap().amount, 3);
    }

    #[test]
    fn test_with_amount_missing_item() {
        let cart = Cart::from_items(vec![item(1, 1)]).unwrap();
        assert!(cart.with_amount(ProductId(9), 2).is_none());
    }

    #[test]
    fn test_without_preserves_order() {
        let cart = Cart::from_items(vec![item(1, 1), item(2, 1), item(3, 1)]).unwrap();
        let next = cart.without(ProductId(2)).expect("item present");

        let ids: Vec<u32> = next.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(cart.without(ProductId(7)).is_none());
    }

    #[test]
    fn test_from_items_rejects_invalid_shapes() {
        assert_eq!(
            Cart::from_items(vec![item(1, 0)]),
            Err(CartShapeError::ZeroAmount(ProductId(1)))
        );
        assert_eq!(
            Cart::from_items(vec![item(1, 1), item(1, 2)]),
            Err(CartShapeError::DuplicateItem(ProductId(1)))
        );
    }

    #[test]
    fn test_totals() {
        let cart = Cart::from_items(vec![item(1, 2), item(2, 3)]).unwrap();
        assert_eq!(cart.item_count(), 5);
        assert!((cart.subtotal() - (101.0 * 2.0 + 102.0 * 3.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extra_attributes_survive() {
        let product = Product::new(7, "Tênis", 99.0, "t.jpg").with_attribute("brand", "Adidas");
        let cart = Cart::new().with_appended(LineItem::from_product(product, 1));

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(back, cart);
        assert_eq!(
            back.with_amount(ProductId(7), 2).unwrap().items()[0].extra["brand"],
            "Adidas"
        );
    }

    #[test]
    fn test_serializes_as_array() {
        let cart = Cart::from_items(vec![item(5, 1)]).unwrap();
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "id": 5,
                "title": "Sneaker 5",
                "price": 105.0,
                "image": "img.png",
                "amount": 1
            }])
        );
    }
}
