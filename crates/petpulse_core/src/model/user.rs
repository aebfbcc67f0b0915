//! Session user record and actor roles.
//!
//! # Responsibility
//! - Define the identity record for the single active session.
//! - Validate registration input before it becomes the session user.
//!
//! # Invariants
//! - At most one user is current at any time; the store owns that slot.
//! - `role` is a closed vocabulary; unknown labels never enter the model.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Actor role deciding which workflow transitions an operation may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Pet owner booking and cancelling appointments.
    Customer,
    /// Clinical staff approving, completing and cancelling appointments.
    Veterinarian,
    /// Administrative staff with approval rights.
    Admin,
}

impl UserRole {
    /// Stable wire label, identical to the serialized tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Veterinarian => "VETERINARIAN",
            Self::Admin => "ADMIN",
        }
    }

    /// Parses a wire label back into a role.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CUSTOMER" => Some(Self::Customer),
            "VETERINARIAN" => Some(Self::Veterinarian),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the current session.
///
/// Replaced wholesale on each login/registration and destroyed on logout;
/// no history is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque id, stable for the session lifetime.
    pub id: String,
    /// Display name.
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Avatar URI.
    pub avatar: String,
}

/// Validation failure for registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    InvalidEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "user name must not be empty"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for UserValidationError {}

impl User {
    /// Checks the shape constraints of the record.
    ///
    /// # Errors
    /// - `EmptyName` when the display name is blank.
    /// - `InvalidEmail` when the email does not look like `local@host.tld`.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(UserValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}
