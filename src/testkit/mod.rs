//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! - [`store`]: [`MemorySalesStore`](store::MemorySalesStore), an in-memory
//!   store with outage and transient-failure injection.
//! - [`cache`]: [`RecordingRefresher`](cache::RecordingRefresher), a
//!   scripted cache client.
//! - [`settings`]: pipeline settings with zero backoff.

pub mod cache;
pub mod settings;
pub mod store;

pub use cache::RecordingRefresher;
pub use settings::fast_settings;
pub use store::MemorySalesStore;
