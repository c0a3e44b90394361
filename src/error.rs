use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised by pipeline stages themselves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("no historical rows available for training")]
    NoTrainingData,

    #[error("stage {stage} invoked without a successful upstream stage")]
    UpstreamNotReady { stage: &'static str },

    #[error("pipeline stopped at {stage}: {reason}")]
    Aborted { stage: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("table {table} does not exist")]
    MissingTable { table: &'static str },

    #[error("another pipeline run holds the lock (holder {holder})")]
    RunInProgress { holder: String },
}

pub type Result<T> = std::result::Result<T, Error>;
