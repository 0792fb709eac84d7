//! Global configuration types for Seedling.
//!
//! `SeedlingConfig` represents the `config.toml` in the data directory.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.seedling/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedlingConfig {
    /// SQLite database file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Reject commits containing posts whose author is not a seeded user.
    #[serde(default)]
    pub strict_references: bool,
}

fn default_database_file() -> String {
    "seedling.db".to_string()
}

impl Default for SeedlingConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            strict_references: false,
        }
    }
}
