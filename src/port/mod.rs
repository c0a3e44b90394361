//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │       Application       │
//!                    │   (pipeline + stages)   │
//!                    └────────────┬────────────┘
//!          ┌──────────────────────┼──────────────────────┐
//!          ▼                      ▼                      ▼
//!    ┌───────────┐          ┌───────────┐          ┌───────────┐
//!    │SalesStore │          │  RunLock  │          │  Cache    │
//!    │ (SQLite)  │          │ (SQLite)  │          │Refresher  │
//!    └───────────┘          └───────────┘          └───────────┘
//! ```

pub mod outbound;

pub use outbound::cache::{CacheRefresher, RefreshRequest};
pub use outbound::lock::{LockGrant, RunLock};
pub use outbound::sales::SalesStore;
