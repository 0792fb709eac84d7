//! Configuration loader for Seedling.
//!
//! Resolves the data directory and reads `config.toml` from it into
//! [`SeedlingConfig`]. Falls back to defaults when the file is missing or
//! malformed.

use std::path::{Path, PathBuf};

use seedling_types::config::SeedlingConfig;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `SEEDLING_DATA_DIR` environment variable
/// 2. `~/.seedling`
/// 3. `.seedling` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SEEDLING_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".seedling");
    }

    PathBuf::from(".seedling")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`SeedlingConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> SeedlingConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return SeedlingConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return SeedlingConfig::default();
        }
    };

    match toml::from_str::<SeedlingConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            SeedlingConfig::default()
        }
    }
}

/// Path of the SQLite database described by `config`.
pub fn database_path(data_dir: &Path, config: &SeedlingConfig) -> PathBuf {
    data_dir.join(&config.database_file)
}
