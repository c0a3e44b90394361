//! `check database`: connect, migrate, and report table contents.

use crate::adapter::outbound::sqlite::SqliteSalesStore;
use crate::cli::{output, Cli};
use crate::error::Result;
use crate::infrastructure::bootstrap::open_database;
use crate::port::outbound::sales::SalesStore;

/// Open the database and report history and forecast rows.
///
/// # Errors
/// Returns an error if the database cannot be opened.
pub async fn execute(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    config.init_logging();

    output::section(&format!("Checking database: {}", config.database.path()));
    let pool = open_database(&config)?;
    output::ok("Connected and migrations applied");

    let store = SqliteSalesStore::new(pool);
    match store.count_history().await {
        Ok(0) => output::warn("Historical table is empty; the next run will seed it"),
        Ok(rows) => output::key_value("History rows", rows),
        Err(e) => output::warn(&format!("Historical table unavailable: {e}")),
    }

    match store.current_prediction().await? {
        Some(p) => output::key_value(
            "Forecast",
            format!(
                "period {} = {:.2} ({}, {})",
                p.predicted_period, p.predicted_sales, p.model_version, p.prediction_date
            ),
        ),
        None => output::key_value("Forecast", "none stored"),
    }

    Ok(())
}
