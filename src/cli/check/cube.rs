//! `check cube`: send a single refresh request.

use crate::adapter::outbound::cube::CubeClient;
use crate::cli::{output, Cli};
use crate::error::Result;
use crate::port::outbound::cache::{CacheRefresher, RefreshRequest};

/// Ask Cube to refresh the configured cube and report the HTTP status.
///
/// Unlike the pipeline stage, a transport failure is an error here.
///
/// # Errors
/// Returns the transport error if the request could not be sent.
pub async fn execute(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    config.init_logging();

    let client = CubeClient::from_config(&config.cube);
    output::section(&format!("Checking Cube: {}", client.refresh_url()));

    let status = client
        .refresh(&RefreshRequest::forced(&config.cube.cube))
        .await?;
    if (200..300).contains(&status) {
        output::ok(&format!("Refresh accepted (HTTP {status})"));
    } else {
        output::warn(&format!("Refresh returned HTTP {status}"));
    }
    Ok(())
}
