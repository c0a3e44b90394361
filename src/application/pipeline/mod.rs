//! The sales forecast pipeline.
//!
//! Stages run strictly in order; a stage runs only when its predecessor
//! succeeded:
//!
//! 1. **Seeding** ([`Seeder`]): make sure history exists (retried)
//! 2. **Verifying** ([`Verifier`]): read a sample of history (retried)
//! 3. **Training** ([`Forecaster`]): fit OLS and replace the stored forecast
//! 4. **Refreshing** ([`CacheRefreshNotifier`]): best-effort cache refresh
//! 5. **Notifying** ([`CompletionNotifier`]): report completion
//!
//! [`Pipeline`] wires the stages together and records a
//! [`PipelineRunOutcome`](crate::domain::PipelineRunOutcome).

mod complete;
mod forecast;
mod orchestrator;
mod refresh;
mod retry;
mod seed;
mod verify;


pub use complete::{CompletionNotifier, COMPLETION_MESSAGE};
pub use forecast::Forecaster;
pub use orchestrator::{Pipeline, PipelineRun, PipelineSettings};
pub use refresh::{CacheRefreshNotifier, RefreshReport};
pub use retry::RetryPolicy;
pub use seed::Seeder;
pub use verify::Verifier;
