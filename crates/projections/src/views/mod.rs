//! View structs for orders and products.

mod order;
mod product;

pub use order::{DeliveryView, OrderItemView, OrderView, PayView};
pub use product::ProductView;
