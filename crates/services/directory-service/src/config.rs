//! Directory service configuration.

use std::env;
use std::path::PathBuf;

const DEFAULT_USERS_FILE: &str = "users.json";
const DEFAULT_PURCHASES_FILE: &str = "buy.json";

/// Directory service configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// JSON document holding all user records
    pub users_file: PathBuf,
    /// JSON array holding the purchase log
    pub purchases_file: PathBuf,
}

impl DirectoryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            users_file: env::var("USERS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_USERS_FILE)),
            purchases_file: env::var("PURCHASES_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_PURCHASES_FILE)),
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            users_file: PathBuf::from(DEFAULT_USERS_FILE),
            purchases_file: PathBuf::from(DEFAULT_PURCHASES_FILE),
        }
    }
}
