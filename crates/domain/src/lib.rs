//! Order-processing domain model.
//!
//! This crate provides the core domain types:
//! - Products with a stock ledger (reserve/restore)
//! - Members with grade-based discount policies
//! - The Order aggregate root orchestrating its Pay and Delivery
//!   state machines and its line items

pub mod member;
pub mod order;
pub mod product;
pub mod value_objects;

pub use member::{Grade, Member, MemberError};
pub use order::{
    Delivery, DeliveryStatus, DiscountPolicy, FixedDiscount, Order, OrderAmount, OrderError,
    OrderItem, OrderStatus, Pay, PayMethod, PayStatus, PercentageDiscount,
};
pub use product::{Product, ProductError, ProductId, StockLedger};
pub use value_objects::{Address, AddressError, Money};
