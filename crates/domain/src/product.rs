//! Products and the stock ledger.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::Money;

/// Product identifier (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur during product operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// Requested quantity exceeds available stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Product price must not be negative.
    #[error("product price must not be negative: {amount}")]
    NegativePrice { amount: i64 },

    /// Product name is missing or blank.
    #[error("product name must not be blank")]
    BlankName,
}

/// A catalog entry with a finite stock quantity.
///
/// Stock never goes negative: `reserve` fails rather than underflow, and
/// restoring is an unconditional increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    stock_quantity: u32,
}

impl Product {
    /// Registers a product in the catalog.
    pub fn register(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        stock_quantity: u32,
    ) -> Result<Self, ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::BlankName);
        }
        if price.is_negative() {
            return Err(ProductError::NegativePrice {
                amount: price.amount(),
            });
        }
        Ok(Self {
            id: id.into(),
            name,
            price,
            stock_quantity,
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    /// Reserves `quantity` units, decrementing available stock.
    pub fn reserve(&mut self, quantity: u32) -> Result<(), ProductError> {
        if quantity > self.stock_quantity {
            return Err(ProductError::InsufficientStock {
                requested: quantity,
                available: self.stock_quantity,
            });
        }
        self.stock_quantity -= quantity;
        Ok(())
    }

    /// Returns `quantity` units to available stock.
    ///
    /// There is no upper bound check; restoring more than was ever reserved
    /// is not detected.
    pub fn restore(&mut self, quantity: u32) {
        self.stock_quantity = self.stock_quantity.saturating_add(quantity);
    }

    /// Changes the product price.
    pub fn change_price(&mut self, price: Money) -> Result<(), ProductError> {
        if price.is_negative() {
            return Err(ProductError::NegativePrice {
                amount: price.amount(),
            });
        }
        self.price = price;
        Ok(())
    }

    /// Changes the product name.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::BlankName);
        }
        self.name = name;
        Ok(())
    }
}

/// Restores reserved quantities to product stock, keyed by product ID.
///
/// The order cancellation cascade uses this to return every line item's
/// quantity without holding references into the catalog.
pub trait StockLedger {
    /// Returns `quantity` units of the identified product to available stock.
    fn restore(&mut self, product_id: &ProductId, quantity: u32);
}

impl StockLedger for HashMap<ProductId, Product> {
    fn restore(&mut self, product_id: &ProductId, quantity: u32) {
        if let Some(product) = self.get_mut(product_id) {
            product.restore(quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(stock: u32) -> Product {
        Product::register("SKU-001", "Widget", Money::new(50_000), stock).unwrap()
    }

    #[test]
    fn test_register_product() {
        let product = widget(50);
        assert_eq!(product.id().as_str(), "SKU-001");
        assert_eq!(product.price().amount(), 50_000);
        assert_eq!(product.stock_quantity(), 50);
    }

    #[test]
    fn test_register_rejects_blank_name() {
        let result = Product::register("SKU-001", " ", Money::new(100), 1);
        assert_eq!(result.unwrap_err(), ProductError::BlankName);
    }

    #[test]
    fn test_register_rejects_negative_price() {
        let result = Product::register("SKU-001", "Widget", Money::new(-1), 1);
        assert!(matches!(
            result,
            Err(ProductError::NegativePrice { amount: -1 })
        ));
    }

    #[test]
    fn test_reserve_decrements_stock() {
        let mut product = widget(50);
        product.reserve(30).unwrap();
        assert_eq!(product.stock_quantity(), 20);
    }

    #[test]
    fn test_reserve_insufficient_stock() {
        let mut product = widget(10);
        let result = product.reserve(11);
        assert_eq!(
            result.unwrap_err(),
            ProductError::InsufficientStock {
                requested: 11,
                available: 10
            }
        );
        // stock unchanged on failure
        assert_eq!(product.stock_quantity(), 10);
    }

    #[test]
    fn test_restore_increments_stock() {
        let mut product = widget(10);
        product.reserve(10).unwrap();
        product.restore(10);
        assert_eq!(product.stock_quantity(), 10);
    }

    #[test]
    fn test_restore_has_no_upper_bound() {
        let mut product = widget(10);
        product.restore(5);
        assert_eq!(product.stock_quantity(), 15);
    }

    #[test]
    fn test_change_price_and_name() {
        let mut product = widget(1);
        product.change_price(Money::new(60_000)).unwrap();
        product.change_name("Widget v2").unwrap();
        assert_eq!(product.price().amount(), 60_000);
        assert_eq!(product.name(), "Widget v2");

        assert!(product.change_price(Money::new(-5)).is_err());
        assert!(product.change_name("").is_err());
    }

    #[test]
    fn test_ledger_restore_by_id() {
        let mut catalog = HashMap::new();
        let mut product = widget(50);
        product.reserve(30).unwrap();
        catalog.insert(product.id().clone(), product);

        StockLedger::restore(&mut catalog, &ProductId::new("SKU-001"), 30);
        assert_eq!(catalog[&ProductId::new("SKU-001")].stock_quantity(), 50);
    }

    #[test]
    fn test_ledger_ignores_unknown_product() {
        let mut catalog: HashMap<ProductId, Product> = HashMap::new();
        StockLedger::restore(&mut catalog, &ProductId::new("SKU-404"), 1);
        assert!(catalog.is_empty());
    }
}
