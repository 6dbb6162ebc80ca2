//! Order aggregate and related types.

mod aggregate;
mod amount;
mod delivery;
mod discount;
mod item;
mod pay;
mod state;

pub use aggregate::Order;
pub use amount::OrderAmount;
pub use delivery::{Delivery, DeliveryStatus};
pub use discount::{DiscountPolicy, FixedDiscount, PercentageDiscount};
pub use item::OrderItem;
pub use pay::{Pay, PayMethod, PayStatus};
pub use state::OrderStatus;

use common::{DeliveryId, OrderId, PayId};
use thiserror::Error;

use crate::product::ProductError;
use crate::value_objects::{AddressError, Money};

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// An order must contain at least one item.
    #[error("order must contain at least one item")]
    EmptyOrderItems,

    /// Item quantity must be greater than zero.
    #[error("invalid order quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Stock reservation or product validation failed.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Shipping address failed validation.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// No shipping address was given and the member has none on file.
    #[error("no shipping address given and the member has none on file")]
    AddressRequired,

    /// Discount has already been applied to this order amount.
    #[error("discount has already been applied")]
    AlreadyDiscounted,

    /// Extra discount must not be negative.
    #[error("extra discount must not be negative: {amount}")]
    InvalidDiscount { amount: i64 },

    /// Total discount would push the final amount below zero.
    #[error("discount {discount} exceeds original amount {original}")]
    DiscountExceedsAmount { original: Money, discount: Money },

    /// Declared payment amount disagrees with the order's final amount.
    #[error("pay amount mismatch for order {order_id}: expected {expected}, got {actual}")]
    PayAmountMismatch {
        order_id: OrderId,
        expected: Money,
        actual: Money,
    },

    /// The order already has a payment bound to it.
    #[error("order {order_id} already has a bound payment")]
    PayAlreadyBound { order_id: OrderId },

    /// A delivery operation was requested before a delivery was prepared.
    #[error("order {order_id} has no delivery bound")]
    DeliveryMissing { order_id: OrderId },

    /// Requested order status change is not an edge of the transition graph.
    #[error("order {order_id}: cannot move from {from} to {to}")]
    InvalidOrderTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Requested pay status change is not an edge of the transition graph.
    #[error("pay {pay_id}: cannot move from {from} to {to}")]
    InvalidPayTransition {
        pay_id: PayId,
        from: PayStatus,
        to: PayStatus,
    },

    /// Requested delivery status change is not an edge of the transition graph.
    #[error("delivery {delivery_id}: cannot move from {from} to {to}")]
    InvalidDeliveryTransition {
        delivery_id: DeliveryId,
        from: DeliveryStatus,
        to: DeliveryStatus,
    },

    /// Order amounts must not be negative.
    #[error("order amount must not be negative: {amount}")]
    NegativeAmount { amount: i64 },
}
