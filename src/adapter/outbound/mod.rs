//! Outbound adapters (driven side).

pub mod cube;
pub mod sqlite;
