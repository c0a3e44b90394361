//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Salesforecast - seed sales history, forecast the next period, refresh the BI cache.
#[derive(Parser, Debug)]
#[command(name = "salesforecast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file [default: config.toml, optional]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the forecast pipeline once (default)
    Run,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `salesforecast check`
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCommand {
    /// Validate configuration file
    Config,
    /// Open the database and report table contents
    Database,
    /// Send one cache refresh request to Cube
    Cube,
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    ///
    /// An explicit `--config` must exist; the default path may be absent.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails validation.
    #[allow(clippy::result_large_err)]
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(DEFAULT_CONFIG_PATH)?,
        };
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
        Ok(config)
    }

    /// Path shown to the operator.
    #[must_use]
    pub fn config_display(&self) -> String {
        self.config.as_ref().map_or_else(
            || DEFAULT_CONFIG_PATH.to_string(),
            |p| p.display().to_string(),
        )
    }
}

/// Execute the parsed command line.
///
/// # Errors
/// Returns the first error raised by the selected command.
pub async fn dispatch(cli: &Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run::execute(cli).await,
        Commands::Check(CheckCommand::Config) => check::config::execute(cli),
        Commands::Check(CheckCommand::Database) => check::database::execute(cli).await,
        Commands::Check(CheckCommand::Cube) => check::cube::execute(cli).await,
    }
}
