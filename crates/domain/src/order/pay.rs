//! Payment attempts.

use chrono::{DateTime, Utc};
use common::{OrderId, PayId};
use serde::{Deserialize, Serialize};

use crate::value_objects::Money;

use super::OrderError;

/// How a payment is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayMethod {
    Card,
    BankTransfer,
    Mobile,
}

/// The status of a payment attempt.
///
/// ```text
/// Ready ──┬──► Paid ──► Canceled
///         ├──► Canceled
///         └──► Failed ──► Ready
/// ```
/// `Canceled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PayStatus {
    #[default]
    Ready,
    Paid,
    Failed,
    Canceled,
}

impl PayStatus {
    /// Returns true if the machine may move from this status to `target`.
    pub fn allows(self, target: PayStatus) -> bool {
        use PayStatus::*;
        matches!(
            (self, target),
            (Ready, Paid) | (Ready, Canceled) | (Ready, Failed) | (Paid, Canceled) | (Failed, Ready)
        )
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, PayStatus::Canceled)
    }

    /// Returns the status name as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            PayStatus::Ready => "Ready",
            PayStatus::Paid => "Paid",
            PayStatus::Failed => "Failed",
            PayStatus::Canceled => "Canceled",
        }
    }
}

impl std::fmt::Display for PayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single payment attempt against an order.
///
/// Created independently by the caller with the declared amount, then bound
/// to an order during payment processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pay {
    id: PayId,
    order_id: Option<OrderId>,
    method: PayMethod,
    amount: Money,
    status: PayStatus,
    paid_at: Option<DateTime<Utc>>,
}

impl Pay {
    /// Creates a payment attempt in the `Ready` state, not yet bound to any
    /// order.
    pub fn new(method: PayMethod, amount: Money) -> Self {
        Self {
            id: PayId::new(),
            order_id: None,
            method,
            amount,
            status: PayStatus::Ready,
            paid_at: None,
        }
    }

    pub fn id(&self) -> PayId {
        self.id
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn method(&self) -> PayMethod {
        self.method
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn status(&self) -> PayStatus {
        self.status
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }

    /// Marks the payment paid after validating the declared amount against
    /// the order's final amount.
    ///
    /// On a mismatch the payment is forced to `Failed` before the error is
    /// returned.
    pub(super) fn complete(&mut self, order_id: OrderId, expected: Money) -> Result<(), OrderError> {
        self.ensure_transition(PayStatus::Paid)?;

        if self.amount != expected {
            self.status = PayStatus::Failed;
            return Err(OrderError::PayAmountMismatch {
                order_id,
                expected,
                actual: self.amount,
            });
        }

        self.status = PayStatus::Paid;
        self.paid_at = Some(Utc::now());
        Ok(())
    }

    /// Cancels the payment. Allowed from `Ready` and from `Paid`, so a paid
    /// order can still be canceled.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.ensure_transition(PayStatus::Canceled)?;
        self.status = PayStatus::Canceled;
        Ok(())
    }

    /// Returns a failed payment to `Ready` so it can be retried.
    pub fn retry(&mut self) -> Result<(), OrderError> {
        self.ensure_transition(PayStatus::Ready)?;
        self.status = PayStatus::Ready;
        Ok(())
    }

    pub(super) fn bind(&mut self, order_id: OrderId) {
        self.order_id = Some(order_id);
    }

    fn ensure_transition(&self, target: PayStatus) -> Result<(), OrderError> {
        if self.status.allows(target) {
            return Ok(());
        }
        Err(OrderError::InvalidPayTransition {
            pay_id: self.id,
            from: self.status,
            to: target,
        })
    }
}
