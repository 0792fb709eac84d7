//! Application state wiring the seed service to its SQLite store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use seedling_core::service::seed::SeedService;
use seedling_infra::config::{database_path, load_config, resolve_data_dir};
use seedling_infra::sqlite::pool::DatabasePool;
use seedling_infra::sqlite::seed::SqliteSeedStore;
use seedling_types::config::SeedlingConfig;

/// Concrete type alias for the service generic pinned to the infra store.
pub type ConcreteSeedService = SeedService<SqliteSeedStore>;

/// Shared state for CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub seed_service: Arc<ConcreteSeedService>,
    pub config: SeedlingConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, open the database.
    ///
    /// `strict_override` replaces `strict_references` from the config file
    /// when given.
    pub async fn init(strict_override: Option<bool>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

        let config = load_config(&data_dir).await;
        let db_path = database_path(&data_dir, &config);
        let db_pool = DatabasePool::open(&db_path)
            .await
            .with_context(|| format!("failed to open database {}", db_path.display()))?;

        let strict = strict_override.unwrap_or(config.strict_references);
        let seed_service =
            SeedService::new(SqliteSeedStore::new(db_pool)).with_strict_references(strict);

        tracing::debug!(data_dir = %data_dir.display(), strict, "application state ready");

        Ok(Self {
            seed_service: Arc::new(seed_service),
            config,
            data_dir,
        })
    }
}
