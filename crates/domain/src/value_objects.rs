//! Value objects shared across the domain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Money amount in integer minor units to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
}

impl Money {
    /// Creates a new Money amount from minor units.
    pub fn new(amount: i64) -> Self {
        Self { amount }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { amount: 0 }
    }

    /// Returns the amount in minor units.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            amount: self.amount * quantity as i64,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.amount)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            amount: self.amount + rhs.amount,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            amount: self.amount - rhs.amount,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.amount += rhs.amount;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.amount -= rhs.amount;
    }
}

/// Errors raised while constructing an address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// A mandatory address field is missing or blank.
    #[error("address field '{0}' must not be blank")]
    BlankField(&'static str),
}

/// A shipping address.
///
/// Postcode, state, city, and street are mandatory; the detail line is
/// optional. Validation happens at construction, so every `Address` in the
/// system is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    postcode: String,
    state: String,
    city: String,
    street: String,
    detail: Option<String>,
}

impl Address {
    /// Creates an address, rejecting blank mandatory fields.
    pub fn new(
        postcode: impl Into<String>,
        state: impl Into<String>,
        city: impl Into<String>,
        street: impl Into<String>,
        detail: Option<String>,
    ) -> Result<Self, AddressError> {
        Ok(Self {
            postcode: required("postcode", postcode.into())?,
            state: required("state", state.into())?,
            city: required("city", city.into())?,
            street: required("street", street.into())?,
            detail,
        })
    }

    pub fn postcode(&self) -> &str {
        &self.postcode
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

fn required(field: &'static str, value: String) -> Result<String, AddressError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AddressError::BlankField(field));
    }
    Ok(trimmed.to_string())
}
