//! Composition root: turns a [`Config`] into a ready [`Pipeline`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapter::outbound::cube::CubeClient;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::{SqliteRunLock, SqliteSalesStore};
use crate::application::pipeline::Pipeline;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::cache::CacheRefresher;
use crate::port::outbound::sales::SalesStore;

/// Open the configured database and apply migrations.
///
/// # Errors
/// Returns an error if the pool cannot be built or migrations fail.
pub fn open_database(config: &Config) -> Result<DbPool> {
    let path = config.database.path();
    let pool = create_pool(path, config.database.pool_size)?;
    run_migrations(&pool)?;
    debug!(database = path, "Database ready");
    Ok(pool)
}

/// Build the cache refresh client.
#[must_use]
pub fn build_cache_client(config: &Config) -> Arc<dyn CacheRefresher> {
    Arc::new(CubeClient::from_config(&config.cube))
}

/// Wire store, lock, and cache client into a pipeline.
///
/// # Errors
/// Returns an error if the database cannot be opened.
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    config.warn_insecure_defaults();

    let pool = open_database(config)?;
    let store: Arc<dyn SalesStore> = Arc::new(SqliteSalesStore::new(pool.clone()));
    let cache = build_cache_client(config);

    let mut pipeline = Pipeline::new(store, cache, config.pipeline_settings());
    if config.lock.enabled {
        pipeline = pipeline.with_lock(Arc::new(SqliteRunLock::new(pool)));
    }

    info!(
        run_id = pipeline.run_id(),
        database = config.database.path(),
        cube_url = %config.cube.refresh_url(),
        lock = config.lock.enabled,
        "Pipeline assembled"
    );
    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_database_runs_migrations_on_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.url = dir.path().join("fresh.db").display().to_string();

        let pool = open_database(&config).unwrap();
        assert!(pool.get().is_ok());
    }

    #[test]
    fn build_pipeline_without_lock() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.url = dir.path().join("nolock.db").display().to_string();
        config.lock.enabled = false;

        let pipeline = build_pipeline(&config).unwrap();
        assert!(!pipeline.run_id().is_empty());
    }
}
