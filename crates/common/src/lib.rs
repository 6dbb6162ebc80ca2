//! Shared identifier types used across the order-processing workspace.

mod types;

pub use types::{DeliveryId, MemberId, OrderId, OrderItemId, PayId};
