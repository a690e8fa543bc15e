//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LoginFailure;
use crate::validation::{self, normalize_email, normalize_phone, Fields, Violation};

/// Persisted user record.
///
/// Field names are camelCase on disk so existing data files stay readable.
/// The password is stored verbatim; there is no hashing in this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Check if this record owns the given normalized email
    pub fn has_email(&self, email: &str) -> bool {
        normalize_email(&self.email) == email
    }

    /// Check if this record owns the given normalized phone
    pub fn has_phone(&self, phone: &str) -> bool {
        normalize_phone(&self.phone) == phone
    }
}

/// The whole user database: one JSON document holding every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl UserDocument {
    /// Check if any record already uses this normalized email
    pub fn email_taken(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.has_email(email))
    }

    /// Check if any record already uses this normalized phone
    pub fn phone_taken(&self, phone: &str) -> bool {
        self.users.iter().any(|u| u.has_phone(phone))
    }

    /// Next identifier: creation time in Unix milliseconds, bumped past the
    /// highest numeric id already stored so ids strictly increase.
    ///
    /// Returns `None` once a stored id is `u64::MAX` and no larger id exists.
    pub fn next_id(&self, now: DateTime<Utc>) -> Option<String> {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let highest = self.users.iter().filter_map(|u| u.id.parse::<u64>().ok()).max();

        let id = match highest {
            Some(max) if max >= candidate => max.checked_add(1)?,
            _ => candidate,
        };
        Some(id.to_string())
    }
}

/// User view safe to return to clients (no password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(example = "1718000000000"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "John"))]
    pub first_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: String,
    /// Lowercased email address
    #[cfg_attr(feature = "openapi", schema(example = "john@example.com"))]
    pub email: String,
    /// Digits-only phone number
    #[cfg_attr(feature = "openapi", schema(example = "29456789"))]
    pub phone: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            created_at: record.created_at,
        }
    }
}

impl From<UserRecord> for PublicUser {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            phone: record.phone,
            created_at: record.created_at,
        }
    }
}

/// Registration request. Every field is optional so that a missing field is
/// reported as a violation instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUser {
    /// Letters only, at most 7 characters
    #[cfg_attr(feature = "openapi", schema(example = "John"))]
    pub first_name: Option<String>,
    /// Letters only, at most 7 characters
    #[cfg_attr(feature = "openapi", schema(example = "Doe"))]
    pub last_name: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "john@example.com"))]
    pub email: Option<String>,
    /// 8 digits starting with 2, 4, 5 or 9; separators are ignored
    #[cfg_attr(feature = "openapi", schema(example = "(29) 45-67-89"))]
    pub phone: Option<String>,
    /// No spaces, at most 10 characters
    #[cfg_attr(feature = "openapi", schema(example = "secret1"))]
    pub password: Option<String>,
}

impl RegisterUser {
    /// Validate every field, returning normalized values or the full list
    /// of violations.
    pub fn validate(self) -> Result<NewUser, Vec<Violation>> {
        let violations = validation::check(Fields {
            first_name: self.first_name.as_deref(),
            last_name: self.last_name.as_deref(),
            email: self.email.as_deref(),
            phone: self.phone.as_deref(),
            password: self.password.as_deref(),
        });
        if !violations.is_empty() {
            return Err(violations);
        }

        // Absent fields always produce a violation, so every field is set here
        Ok(NewUser {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: normalize_email(self.email.as_deref().unwrap_or_default()),
            phone: normalize_phone(self.phone.as_deref().unwrap_or_default()),
            password: self.password.unwrap_or_default(),
        })
    }
}

/// Validated, normalized registration ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl NewUser {
    /// Build the persisted record with its assigned id and creation time
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> UserRecord {
        UserRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            password: self.password,
            created_at,
        }
    }
}

/// Login request: email or phone, plus password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct Credentials {
    #[cfg_attr(feature = "openapi", schema(example = "john@example.com"))]
    pub email: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "29456789"))]
    pub phone: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "secret1"))]
    pub password: Option<String>,
}

impl Credentials {
    /// Resolve which identifier to look up. Email wins when both are given;
    /// blank values count as absent.
    pub fn resolve(&self) -> Result<(LoginIdentifier, &str), LoginFailure> {
        let password = present(&self.password).ok_or(LoginFailure::MissingCredentials)?;

        let identifier = match (present(&self.email), present(&self.phone)) {
            (Some(email), _) => LoginIdentifier::Email(normalize_email(email)),
            (None, Some(phone)) => LoginIdentifier::Phone(normalize_phone(phone)),
            (None, None) => return Err(LoginFailure::MissingCredentials),
        };

        Ok((identifier, password))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Normalized login identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Email(String),
    Phone(String),
}

impl LoginIdentifier {
    /// Check if a record is addressed by this identifier
    pub fn matches(&self, record: &UserRecord) -> bool {
        match self {
            LoginIdentifier::Email(email) => record.has_email(email),
            LoginIdentifier::Phone(phone) => record.has_phone(phone),
        }
    }
}
