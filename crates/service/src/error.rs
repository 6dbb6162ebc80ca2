//! Service error types.

use common::{MemberId, OrderId};
use domain::{OrderError, ProductId};
use thiserror::Error;

/// Errors that can occur in the application layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No member with the given ID exists.
    #[error("member not found: {0}")]
    MemberNotFound(MemberId),

    /// No product with the given ID exists.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// No order with the given ID exists.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Convenience type alias for service results.
pub type Result<T> = std::result::Result<T, ServiceError>;
