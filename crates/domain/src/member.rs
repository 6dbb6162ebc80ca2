//! Members and membership grades.

use std::str::FromStr;

use common::MemberId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::Address;

/// Errors that can occur during member operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemberError {
    /// Grade string did not match any known grade.
    #[error("unknown member grade: {0}")]
    UnknownGrade(String),

    /// Member name is missing or blank.
    #[error("member name must not be blank")]
    BlankName,
}

/// Membership grade, used to index discount tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    Bronze,
    Silver,
    Gold,
    Vip,
}

impl Grade {
    /// Returns the grade name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Bronze => "Bronze",
            Grade::Silver => "Silver",
            Grade::Gold => "Gold",
            Grade::Vip => "Vip",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Grade {
    type Err = MemberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BRONZE" => Ok(Grade::Bronze),
            "SILVER" => Ok(Grade::Silver),
            "GOLD" => Ok(Grade::Gold),
            "VIP" => Ok(Grade::Vip),
            _ => Err(MemberError::UnknownGrade(s.to_string())),
        }
    }
}

/// A registered member who can place orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: String,
    grade: Grade,
    address: Option<Address>,
}

impl Member {
    /// Registers a member with the given name and grade.
    pub fn new(name: impl Into<String>, grade: Grade) -> Result<Self, MemberError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MemberError::BlankName);
        }
        Ok(Self {
            id: MemberId::new(),
            name,
            grade,
            address: None,
        })
    }

    /// Sets the member's address on file.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Replaces the member's address on file.
    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }
}
