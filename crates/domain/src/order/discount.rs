//! Member-grade discount policies.

use crate::member::{Grade, Member};
use crate::value_objects::Money;

/// Computes a discount from a member's grade and an order's original amount.
///
/// The active policy is a configuration choice of the caller; orders do not
/// know which policy is in effect.
pub trait DiscountPolicy {
    /// Returns the discount amount for `member` on `original_amount`.
    fn discount(&self, member: &Member, original_amount: Money) -> Money;
}

/// Percentage discount per grade: Bronze 0%, Silver 5%, Gold 10%, Vip 20%.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentageDiscount;

impl DiscountPolicy for PercentageDiscount {
    fn discount(&self, member: &Member, original_amount: Money) -> Money {
        let percent = match member.grade() {
            Grade::Bronze => 0,
            Grade::Silver => 5,
            Grade::Gold => 10,
            Grade::Vip => 20,
        };
        Money::new(original_amount.amount() * percent / 100)
    }
}

/// Flat discount per grade: Bronze 0, Silver 1000, Gold 2000, Vip 5000.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDiscount;

impl DiscountPolicy for FixedDiscount {
    fn discount(&self, member: &Member, _original_amount: Money) -> Money {
        match member.grade() {
            Grade::Bronze => Money::zero(),
            Grade::Silver => Money::new(1_000),
            Grade::Gold => Money::new(2_000),
            Grade::Vip => Money::new(5_000),
        }
    }
}
