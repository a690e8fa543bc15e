//! Field validation for user registration.
//!
//! Every check runs on every call and all failures are reported together,
//! so a client can fix its whole form in one round trip.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::constants::{MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, PHONE_DIGITS, PHONE_PREFIXES};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// A single rejected registration field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("Invalid first name")]
    FirstName,

    #[error("Invalid last name")]
    LastName,

    #[error("Invalid email")]
    Email,

    #[error("Invalid phone")]
    Phone,

    #[error("Invalid password")]
    Password,
}

/// Raw registration fields, as received.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fields<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub password: Option<&'a str>,
}

/// Check all fields and collect every violation, in field order.
pub fn check(fields: Fields<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !is_valid_name(fields.first_name) {
        violations.push(Violation::FirstName);
    }
    if !is_valid_name(fields.last_name) {
        violations.push(Violation::LastName);
    }
    if !is_valid_email(fields.email) {
        violations.push(Violation::Email);
    }
    if !is_valid_phone(fields.phone) {
        violations.push(Violation::Phone);
    }
    if !is_valid_password(fields.password) {
        violations.push(Violation::Password);
    }

    violations
}

/// Letters only, non-blank, at most [`MAX_NAME_LENGTH`] characters.
pub fn is_valid_name(value: Option<&str>) -> bool {
    match value {
        Some(name) if !name.trim().is_empty() => {
            name.chars().count() <= MAX_NAME_LENGTH
                && name.chars().all(|c| c.is_ascii_alphabetic())
        }
        _ => false,
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(value: Option<&str>) -> bool {
    matches!(value, Some(email) if EMAIL_REGEX.is_match(email))
}

/// Exactly [`PHONE_DIGITS`] digits after stripping, starting with an allowed prefix.
pub fn is_valid_phone(value: Option<&str>) -> bool {
    let Some(raw) = value else {
        return false;
    };
    let digits = normalize_phone(raw);
    digits.len() == PHONE_DIGITS && digits.starts_with(PHONE_PREFIXES)
}

/// Non-empty, no spaces, at most [`MAX_PASSWORD_LENGTH`] characters.
pub fn is_valid_password(value: Option<&str>) -> bool {
    match value {
        Some(password) if !password.is_empty() => {
            !password.contains(' ') && password.chars().count() <= MAX_PASSWORD_LENGTH
        }
        _ => false,
    }
}

/// Canonical email form used for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Canonical phone form: ASCII digits only.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}
