//! Handler for the `run` command (and the bare invocation).

use tracing::info;

use crate::cli::{output, Cli};
use crate::domain::StageStatus;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_pipeline;

/// Run the pipeline once and print a per-stage summary.
///
/// # Errors
/// Returns the error that aborted the run, or a setup error.
pub async fn execute(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    config.init_logging();
    info!(config = %cli.config_display(), "salesforecast starting");

    let pipeline = build_pipeline(&config)?;
    let run = pipeline.run().await;

    output::section("Pipeline run");
    for record in run.outcome.records() {
        match &record.status {
            StageStatus::Ok => output::ok(record.stage.name()),
            StageStatus::Warning(w) => output::warn(&format!("{}: {w}", record.stage.name())),
            StageStatus::Failed(reason) => {
                output::error(&format!("{}: {reason}", record.stage.name()));
            }
            StageStatus::Skipped => output::key_value(record.stage.name(), "skipped"),
        }
    }
    if let Some(prediction) = &run.prediction {
        output::key_value("Period", prediction.predicted_period);
        output::key_value("Forecast", format!("{:.2}", prediction.predicted_sales));
        output::key_value("Model", &prediction.model_version);
    }
    if let Some(message) = &run.message {
        output::key_value("Status", message);
    }

    run.into_result().map(|_| ())
}
