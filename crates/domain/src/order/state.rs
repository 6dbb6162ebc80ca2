//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// ```text
/// Ordered ──► Confirmed ──► ShipReady ──► Shipping ──► Completed
///    │            │             │
///    └────────────┴─────────────┴──► Canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order has been placed and stock reserved.
    #[default]
    Ordered,

    /// Payment has been confirmed.
    Confirmed,

    /// A delivery has been prepared and is awaiting pickup.
    ShipReady,

    /// The delivery is on its way.
    Shipping,

    /// The delivery arrived (terminal).
    Completed,

    /// The order was canceled (terminal).
    Canceled,
}

impl OrderStatus {
    /// Returns true if the machine may move from this status to `target`.
    pub fn allows(self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Ordered, Confirmed)
                | (Ordered, Canceled)
                | (Confirmed, ShipReady)
                | (Confirmed, Canceled)
                | (ShipReady, Shipping)
                | (ShipReady, Canceled)
                | (Shipping, Completed)
        )
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Returns the status name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Ordered => "Ordered",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::ShipReady => "ShipReady",
            OrderStatus::Shipping => "Shipping",
            OrderStatus::Completed => "Completed",
            OrderStatus::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
