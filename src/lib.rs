//! Salesforecast - a batch pipeline that keeps a one-period sales forecast
//! fresh for a BI layer.
//!
//! Each run seeds the historical sales table when it is missing or empty,
//! verifies the data can be read, fits an ordinary-least-squares line over
//! `(period, sales)`, stores the forecast for the next period, and asks the
//! Cube semantic layer to rebuild its pre-aggregations.
//!
//! # Architecture
//!
//! - **`domain`** - Sales records, the linear model, and run outcomes
//! - **`port`** - Outbound traits for storage, the run lock, and the cache
//! - **`adapter`** - SQLite (diesel) and Cube (reqwest) implementations
//! - **`application`** - The stage pipeline and its retry policy
//! - **`infrastructure`** - Configuration and runtime wiring
//! - **`cli`** - Command-line entry points
//!
//! # Example
//!
//! ```no_run
//! use salesforecast::infrastructure::bootstrap::build_pipeline;
//! use salesforecast::infrastructure::config::settings::Config;
//!
//! # async fn demo() -> salesforecast::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let run = build_pipeline(&config)?.run().await;
//! println!("{}", run.outcome);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
