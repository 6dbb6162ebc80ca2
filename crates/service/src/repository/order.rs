//! Order store port and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use domain::Order;

use crate::error::Result;

/// Trait for order lookup and storage.
///
/// The full aggregate graph (order, items, pay, delivery) is loaded and
/// saved as one unit.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Finds an order by ID. Returns `None` when no such order exists.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>>;

    /// Saves an order, replacing any existing entry with the same ID.
    async fn save(&self, order: Order) -> Result<()>;
}

/// In-memory order store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub fn order_count(&self) -> usize {
        self.orders.read().unwrap().len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().unwrap().get(&id).cloned())
    }

    async fn save(&self, order: Order) -> Result<()> {
        self.orders.write().unwrap().insert(order.id(), order);
        Ok(())
    }
}
