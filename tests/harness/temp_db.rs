use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use salesforecast::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};
use salesforecast::infrastructure::config::settings::Config;

/// Temporary on-disk SQLite database for integration tests.
///
/// File-backed so every pooled connection sees the same data.
pub struct TempDb {
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("salesforecast-{name}-{nanos}.db"));

        let pool = create_pool(&path.display().to_string(), 4).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self { path, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    /// Default configuration pointed at this database and `cube_base_url`.
    pub fn config(&self, cube_base_url: &str) -> Config {
        let mut config = Config::default();
        config.database.url = self.url();
        config.cube.base_url = cube_base_url.to_string();
        config.cube.timeout_secs = 1;
        config.retry.backoff_secs = 0;
        config
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm", "-journal"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = std::fs::remove_file(side);
        }
    }
}
