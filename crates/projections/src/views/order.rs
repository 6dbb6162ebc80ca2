//! Order views — the aggregate and its sub-entities as plain data.

use chrono::{DateTime, Utc};
use common::{DeliveryId, MemberId, OrderId, OrderItemId, PayId};
use domain::{
    Address, Delivery, DeliveryStatus, Money, Order, OrderItem, OrderStatus, Pay, PayMethod,
    PayStatus, ProductId,
};
use serde::{Deserialize, Serialize};

/// A line item as the API layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemView {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub order_price: Money,
    pub quantity: u32,
    pub total_amount: Money,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.id(),
            product_id: item.product_id().clone(),
            product_name: item.product_name().to_string(),
            order_price: item.order_price(),
            quantity: item.quantity(),
            total_amount: item.total_amount(),
        }
    }
}

/// A payment attempt as the API layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayView {
    pub id: PayId,
    pub method: PayMethod,
    pub amount: Money,
    pub status: PayStatus,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<&Pay> for PayView {
    fn from(pay: &Pay) -> Self {
        Self {
            id: pay.id(),
            method: pay.method(),
            amount: pay.amount(),
            status: pay.status(),
            paid_at: pay.paid_at(),
        }
    }
}

/// A shipment as the API layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryView {
    pub id: DeliveryId,
    pub status: DeliveryStatus,
    pub tracking_no: Option<String>,
    pub ship_addr: Address,
    pub shipped_at: Option<DateTime<Utc>>,
    pub arrived_at: Option<DateTime<Utc>>,
}

impl From<&Delivery> for DeliveryView {
    fn from(delivery: &Delivery) -> Self {
        Self {
            id: delivery.id(),
            status: delivery.status(),
            tracking_no: delivery.tracking_no().map(str::to_string),
            ship_addr: delivery.ship_addr().clone(),
            shipped_at: delivery.shipped_at(),
            arrived_at: delivery.arrived_at(),
        }
    }
}

/// The full order aggregate as the API layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: OrderId,
    pub member_id: MemberId,
    pub status: OrderStatus,
    pub ordered_at: DateTime<Utc>,
    pub original_amount: Money,
    pub discount_amount: Money,
    pub final_amount: Money,
    pub ship_addr: Option<Address>,
    pub items: Vec<OrderItemView>,
    pub pay: Option<PayView>,
    pub delivery: Option<DeliveryView>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            member_id: order.member_id(),
            status: order.status(),
            ordered_at: order.ordered_at(),
            original_amount: order.amount().original_amount(),
            discount_amount: order.amount().discount_amount(),
            final_amount: order.amount().final_amount(),
            ship_addr: order.ship_addr().cloned(),
            items: order.items().iter().map(OrderItemView::from).collect(),
            pay: order.pay().map(PayView::from),
            delivery: order.delivery().map(DeliveryView::from),
        }
    }
}
