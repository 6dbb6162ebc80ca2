//! Shipments.

use chrono::{DateTime, Utc};
use common::{DeliveryId, OrderId};
use serde::{Deserialize, Serialize};

use crate::value_objects::Address;

use super::OrderError;

/// The status of a shipment.
///
/// ```text
/// Ready ──┬──► Shipping ──┬──► Completed
///         │               └──► Failed
///         ├──► Failed
///         └──► Canceled
/// ```
/// `Completed`, `Failed`, and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryStatus {
    #[default]
    Ready,
    Shipping,
    Completed,
    Failed,
    Canceled,
}

impl DeliveryStatus {
    /// Returns true if the machine may move from this status to `target`.
    pub fn allows(self, target: DeliveryStatus) -> bool {
        use DeliveryStatus::*;
        matches!(
            (self, target),
            (Ready, Shipping)
                | (Ready, Failed)
                | (Ready, Canceled)
                | (Shipping, Completed)
                | (Shipping, Failed)
        )
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DeliveryStatus::Completed | DeliveryStatus::Failed | DeliveryStatus::Canceled
        )
    }

    /// Returns the status name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Ready => "Ready",
            DeliveryStatus::Shipping => "Shipping",
            DeliveryStatus::Completed => "Completed",
            DeliveryStatus::Failed => "Failed",
            DeliveryStatus::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single shipment for an order.
///
/// Always created bound to its order, with an address that has already
/// passed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    id: DeliveryId,
    order_id: OrderId,
    status: DeliveryStatus,
    tracking_no: Option<String>,
    ship_addr: Address,
    shipped_at: Option<DateTime<Utc>>,
    arrived_at: Option<DateTime<Utc>>,
}

impl Delivery {
    /// Prepares a shipment for `order_id` to the given address.
    pub(super) fn ready(order_id: OrderId, ship_addr: Address) -> Self {
        Self {
            id: DeliveryId::new(),
            order_id,
            status: DeliveryStatus::Ready,
            tracking_no: None,
            ship_addr,
            shipped_at: None,
            arrived_at: None,
        }
    }

    pub fn id(&self) -> DeliveryId {
        self.id
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }

    pub fn tracking_no(&self) -> Option<&str> {
        self.tracking_no.as_deref()
    }

    pub fn ship_addr(&self) -> &Address {
        &self.ship_addr
    }

    pub fn shipped_at(&self) -> Option<DateTime<Utc>> {
        self.shipped_at
    }

    pub fn arrived_at(&self) -> Option<DateTime<Utc>> {
        self.arrived_at
    }

    /// Starts the shipment, recording the tracking number and ship time.
    pub(super) fn start(
        &mut self,
        tracking_no: impl Into<String>,
        shipped_at: Option<DateTime<Utc>>,
    ) -> Result<(), OrderError> {
        self.ensure_transition(DeliveryStatus::Shipping)?;
        self.status = DeliveryStatus::Shipping;
        self.tracking_no = Some(tracking_no.into());
        self.shipped_at = Some(shipped_at.unwrap_or_else(Utc::now));
        Ok(())
    }

    /// Completes the shipment, recording the arrival time.
    pub(super) fn complete(&mut self, arrived_at: Option<DateTime<Utc>>) -> Result<(), OrderError> {
        self.ensure_transition(DeliveryStatus::Completed)?;
        self.status = DeliveryStatus::Completed;
        self.arrived_at = Some(arrived_at.unwrap_or_else(Utc::now));
        Ok(())
    }

    /// Cancels a shipment that has not left yet.
    pub(super) fn cancel(&mut self) -> Result<(), OrderError> {
        self.ensure_transition(DeliveryStatus::Canceled)?;
        self.status = DeliveryStatus::Canceled;
        Ok(())
    }

    /// Records a failed shipment attempt.
    pub fn fail(&mut self) -> Result<(), OrderError> {
        self.ensure_transition(DeliveryStatus::Failed)?;
        self.status = DeliveryStatus::Failed;
        Ok(())
    }

    fn ensure_transition(&self, target: DeliveryStatus) -> Result<(), OrderError> {
        if self.status.allows(target) {
            return Ok(());
        }
        Err(OrderError::InvalidDeliveryTransition {
            delivery_id: self.id,
            from: self.status,
            to: target,
        })
    }
}
