//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum length of a first or last name
pub const MAX_NAME_LENGTH: usize = 7;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 10;

/// Exact number of digits in a normalized phone number
pub const PHONE_DIGITS: usize = 8;

/// Allowed leading digits of a normalized phone number
pub const PHONE_PREFIXES: &[char] = &['2', '4', '5', '9'];

// =============================================================================
// Purchases
// =============================================================================

/// Field stamped onto every purchase entry at receipt time
pub const PURCHASE_DATE_FIELD: &str = "date";
