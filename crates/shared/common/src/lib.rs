//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling with HTTP response mapping
//! - Storage error types shared by every file-backed store

pub mod error;

pub use error::{AppError, AppResult, StorageError};
