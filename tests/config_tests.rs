use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use salesforecast::error::{ConfigError, Error};
use salesforecast::infrastructure::config::settings::Config;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("salesforecast-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn full_config_loads_every_section() {
    let toml = r#"
[database]
url = "forecast.db"
pool_size = 2

[cube]
base_url = "http://localhost:4000"
cube = "SalesForecast"
timeout_secs = 15

[retry]
max_attempts = 4
backoff_secs = 10

[forecast]
model_version = "v2.0"
sample_size = 3

[lock]
enabled = false
stale_after_secs = 120

[logging]
level = "debug"
format = "json"
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);
    let config = result.expect("config loads");

    assert_eq!(config.cube.refresh_url(), "http://localhost:4000/cubejs-api/v1/pre-aggregations/refresh");
    assert_eq!(config.cube.timeout_secs, 15);
    assert!(!config.lock.enabled);
    assert_eq!(config.logging.format, "json");

    let settings = config.pipeline_settings();
    assert_eq!(settings.retry.max_attempts, 4);
    assert_eq!(settings.retry.backoff, Duration::from_secs(10));
    assert_eq!(settings.model_version, "v2.0");
    assert_eq!(settings.sample_size, 3);
    assert_eq!(settings.cube, "SalesForecast");
}

#[test]
fn config_rejects_zero_attempts() {
    let path = write_temp_config("[retry]\nmax_attempts = 0\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "retry.max_attempts",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid max_attempts error, got {err}"),
        Ok(_) => panic!("Expected invalid max_attempts error, got Ok"),
    }
}

#[test]
fn config_rejects_zero_timeout() {
    let path = write_temp_config("[cube]\ntimeout_secs = 0\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "cube.timeout_secs",
            ..
        }))
    ));
}

#[test]
fn config_rejects_empty_cube_url() {
    let path = write_temp_config("[cube]\nbase_url = \"\"\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField {
            field: "cube.base_url"
        }))
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let path = write_temp_config("[retry\nmax_attempts = 3\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn missing_file_is_read_error() {
    let result = Config::load("/nonexistent/salesforecast.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn load_or_default_tolerates_missing_file() {
    let config = Config::load_or_default("/nonexistent/salesforecast.toml").unwrap();
    assert_eq!(config.forecast.model_version, "v1.1-dynamic");
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.backoff_secs, 30);
}
