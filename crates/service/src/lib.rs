//! Application layer for the order domain.
//!
//! This crate provides:
//! - Repository ports for the member directory, the product catalog, and
//!   the order store, with in-memory implementations
//! - The `OrderService` that drives orders through their lifecycle
//!
//! Each service operation loads the aggregates it needs, delegates to the
//! domain, and saves only on success, so a failed operation persists
//! nothing.

pub mod error;
pub mod orders;
pub mod repository;

pub use error::ServiceError;
pub use orders::{OrderLine, OrderService};
pub use repository::{
    InMemoryMemberRepository, InMemoryOrderRepository, InMemoryProductRepository,
    MemberRepository, OrderRepository, ProductRepository,
};
