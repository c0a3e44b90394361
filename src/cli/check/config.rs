//! `check config`: validate configuration without running the pipeline.

use crate::adapter::outbound::cube::settings::API_TOKEN_ENV;
use crate::cli::{output, Cli};
use crate::error::Result;

/// Load, validate, and summarise the configuration.
///
/// # Errors
/// Returns the configuration error, if any.
pub fn execute(cli: &Cli) -> Result<()> {
    output::section(&format!("Checking configuration: {}", cli.config_display()));

    let config = cli.load_config()?;
    output::ok("Configuration is valid");

    output::key_value("Database", config.database.path());
    output::key_value("Cube URL", config.cube.refresh_url());
    output::key_value("Cube", &config.cube.cube);
    output::key_value("Model", &config.forecast.model_version);
    output::key_value(
        "Retry",
        format!(
            "{} attempts, {}s backoff",
            config.retry.max_attempts, config.retry.backoff_secs
        ),
    );
    output::key_value(
        "Run lock",
        if config.lock.enabled {
            format!("enabled (stale after {}s)", config.lock.stale_after_secs)
        } else {
            "disabled".to_string()
        },
    );

    if config.cube.uses_placeholder_token() {
        output::warn(&format!(
            "Cube API token is the placeholder; set {API_TOKEN_ENV}"
        ));
    } else {
        output::ok("Cube API token configured");
    }

    Ok(())
}
