//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! user records and their public view, registration and login inputs,
//! field validation, and purchase log entries.

pub mod constants;
pub mod error;
pub mod purchase;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{ConflictField, DomainError, DomainResult, LoginFailure};
pub use purchase::{split_batch, Purchase};
pub use user::{Credentials, LoginIdentifier, NewUser, PublicUser, RegisterUser, UserDocument, UserRecord};
pub use validation::{normalize_email, normalize_phone, Violation};
