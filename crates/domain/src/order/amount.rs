//! Order amount calculation.

use serde::{Deserialize, Serialize};

use crate::member::Member;
use crate::value_objects::Money;

use super::{DiscountPolicy, OrderError};

/// Original, discount, and final amounts for an order.
///
/// The final amount is always `original - discount` and never negative.
/// A discount may be applied at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAmount {
    original_amount: Money,
    discount_amount: Money,
    final_amount: Money,
    discounted: bool,
}

impl OrderAmount {
    /// Creates an undiscounted amount from the item total.
    pub fn new(original_amount: Money) -> Result<Self, OrderError> {
        if original_amount.is_negative() {
            return Err(OrderError::NegativeAmount {
                amount: original_amount.amount(),
            });
        }
        Ok(Self {
            original_amount,
            discount_amount: Money::zero(),
            final_amount: original_amount,
            discounted: false,
        })
    }

    pub fn original_amount(&self) -> Money {
        self.original_amount
    }

    pub fn discount_amount(&self) -> Money {
        self.discount_amount
    }

    pub fn final_amount(&self) -> Money {
        self.final_amount
    }

    pub fn is_discounted(&self) -> bool {
        self.discounted
    }

    /// Applies `policy` for `member`, plus an optional extra discount.
    ///
    /// A second application fails, as does an extra discount below zero or
    /// a total discount that would push the final amount negative.
    pub fn apply_discount(
        &mut self,
        member: &Member,
        policy: &dyn DiscountPolicy,
        extra_discount: Option<Money>,
    ) -> Result<(), OrderError> {
        if self.discounted {
            return Err(OrderError::AlreadyDiscounted);
        }

        let extra = extra_discount.unwrap_or_else(Money::zero);
        if extra.is_negative() {
            return Err(OrderError::InvalidDiscount {
                amount: extra.amount(),
            });
        }

        let discount = policy.discount(member, self.original_amount) + extra;
        let final_amount = self.original_amount - discount;
        if final_amount.is_negative() {
            return Err(OrderError::DiscountExceedsAmount {
                original: self.original_amount,
                discount,
            });
        }

        self.discount_amount = discount;
        self.final_amount = final_amount;
        self.discounted = true;
        Ok(())
    }
}
