//! Diagnostic checks for configuration, database, and Cube connectivity.

pub mod config;
pub mod cube;
pub mod database;
