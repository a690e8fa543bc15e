//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, storage).

use std::fmt;

use thiserror::Error;

use crate::validation::Violation;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more registration fields failed validation
    #[error("Validation error: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    /// A unique field is already taken by another record
    #[error("{0} already exists")]
    Conflict(ConflictField),

    /// Login did not resolve to exactly one account
    #[error("{0}")]
    InvalidCredentials(LoginFailure),

    /// Input is structurally unusable (e.g. a purchase entry that is not an object)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }
}

/// Unique user fields that can collide on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    Phone,
}

impl fmt::Display for ConflictField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictField::Email => write!(f, "Email"),
            ConflictField::Phone => write!(f, "Phone"),
        }
    }
}

/// Why a login attempt was rejected.
///
/// Unknown identifier and wrong password are reported separately; nothing
/// else about the stored records is revealed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    #[error("Email or phone and password are required")]
    MissingCredentials,

    #[error("No account matches this email or phone")]
    UnknownIdentifier,

    #[error("Incorrect password")]
    PasswordMismatch,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
