//! Read-only views of the order domain.
//!
//! This crate provides the query side of the system: plain serializable
//! projections of domain state for the API layer to render. Views carry
//! no behavior; each is built from a domain object with a `From`
//! conversion and exposes exactly the public fields a caller may read.

pub mod views;

pub use views::{DeliveryView, OrderItemView, OrderView, PayView, ProductView};
