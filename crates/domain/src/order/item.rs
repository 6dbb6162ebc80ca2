//! Order line items.

use common::{OrderId, OrderItemId};
use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};
use crate::value_objects::Money;

use super::OrderError;

/// An immutable line item bound to a product at creation time.
///
/// The product name and price are snapshotted when the item is created, so
/// later catalog edits do not change what the buyer ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: OrderItemId,
    order_id: Option<OrderId>,
    product_id: ProductId,
    product_name: String,
    order_price: Money,
    quantity: u32,
}

impl OrderItem {
    /// Creates a line item for `quantity` units of `product`, reserving that
    /// quantity from the product's stock.
    ///
    /// The returned item is not yet attached to any order; the order
    /// aggregate attaches it once at creation.
    pub fn create(product: &mut Product, quantity: u32) -> Result<Self, OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity { quantity });
        }
        product.reserve(quantity)?;
        Ok(Self {
            id: OrderItemId::new(),
            order_id: None,
            product_id: product.id().clone(),
            product_name: product.name().to_string(),
            order_price: product.price(),
            quantity,
        })
    }

    pub fn id(&self) -> OrderItemId {
        self.id
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn order_price(&self) -> Money {
        self.order_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Total for this line: price at order time times quantity.
    pub fn total_amount(&self) -> Money {
        self.order_price.multiply(self.quantity)
    }

    pub(super) fn attach(&mut self, order_id: OrderId) {
        self.order_id = Some(order_id);
    }
}
