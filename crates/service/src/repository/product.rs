//! Product catalog port and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Product, ProductId};

use crate::error::Result;

/// Trait for product lookup and storage.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Finds a product by ID. Returns `None` when no such product exists.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Saves a product, replacing any existing entry with the same ID.
    async fn save(&self, product: Product) -> Result<()>;
}

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub fn product_count(&self) -> usize {
        self.products.read().unwrap().len()
    }

    /// Returns the current stock quantity of a product, if it exists.
    pub fn stock_of(&self, id: &ProductId) -> Option<u32> {
        self.products
            .read()
            .unwrap()
            .get(id)
            .map(Product::stock_quantity)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().unwrap().get(id).cloned())
    }

    async fn save(&self, product: Product) -> Result<()> {
        self.products
            .write()
            .unwrap()
            .insert(product.id().clone(), product);
        Ok(())
    }
}
