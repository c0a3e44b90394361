//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations of the sales store and the run
//! lock using Diesel ORM.

pub mod database;
pub mod lock;
pub mod sales;

pub use lock::SqliteRunLock;
pub use sales::SqliteSalesStore;
