//! Configuration sections and loading.

pub mod database;
pub mod logging;
pub mod pipeline;
pub mod settings;
