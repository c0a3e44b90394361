//! Cube analytics cache adapter.

pub mod client;
pub mod settings;

pub use client::CubeClient;
pub use settings::CubeConfig;
