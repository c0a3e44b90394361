//! Database connection configuration.

use serde::Deserialize;

/// Environment variable overriding [`DatabaseConfig::url`].
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// SQLite database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path (or `sqlite://` URL) of the database file.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum connections held by the pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

fn default_url() -> String {
    "salesforecast.db".into()
}

const fn default_pool_size() -> u32 {
    4
}

impl DatabaseConfig {
    /// Path diesel should open, with any `sqlite://` scheme stripped.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))
            .unwrap_or(&self.url)
    }

    /// True for SQLite's private per-connection database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path() == ":memory:"
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            pool_size: default_pool_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_strips_sqlite_scheme() {
        let mut config = DatabaseConfig::default();
        assert_eq!(config.path(), "salesforecast.db");

        config.url = "sqlite:///var/lib/forecast.db".into();
        assert_eq!(config.path(), "/var/lib/forecast.db");

        config.url = "sqlite:data.db".into();
        assert_eq!(config.path(), "data.db");
        assert!(!config.is_in_memory());

        config.url = "sqlite::memory:".into();
        assert!(config.is_in_memory());
    }
}
