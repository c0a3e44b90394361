//! Sequential stage runner with short-circuiting.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::complete::CompletionNotifier;
use super::forecast::Forecaster;
use super::refresh::{CacheRefreshNotifier, RefreshReport};
use super::retry::RetryPolicy;
use super::seed::Seeder;
use super::verify::Verifier;
use crate::domain::{PipelineRunOutcome, PredictionRecord, Stage, StageStatus};
use crate::error::{Error, PipelineError, Result};
use crate::port::outbound::cache::CacheRefresher;
use crate::port::outbound::lock::RunLock;
use crate::port::outbound::sales::SalesStore;

/// Tunables for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Applied to seeding and verification only.
    pub retry: RetryPolicy,
    /// Tag stored alongside each forecast.
    pub model_version: String,
    /// Rows read by the verifier.
    pub sample_size: i64,
    /// Cube refreshed after a forecast is stored.
    pub cube: String,
    /// Name of the run lock row.
    pub lock_name: String,
    /// Age after which a held run lock is taken over.
    pub lock_stale_after: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            model_version: "v1.1-dynamic".to_string(),
            sample_size: 5,
            cube: "MlPrediccionVentas".to_string(),
            lock_name: "sales-forecast".to_string(),
            lock_stale_after: Duration::from_secs(3600),
        }
    }
}

/// Everything one invocation produced.
#[derive(Debug)]
pub struct PipelineRun {
    pub outcome: PipelineRunOutcome,
    pub prediction: Option<PredictionRecord>,
    pub refresh: Option<RefreshReport>,
    /// Completion message, present only when every stage ran.
    pub message: Option<String>,
    /// Fatal error that aborted the run. A "not ready" abort has none.
    pub error: Option<Error>,
}

impl PipelineRun {
    fn new() -> Self {
        Self {
            outcome: PipelineRunOutcome::new(),
            prediction: None,
            refresh: None,
            message: None,
            error: None,
        }
    }

    fn abort(mut self, stage: Stage, reason: impl Into<String>, error: Option<Error>) -> Self {
        let reason = reason.into();
        error!(
            stage = %stage,
            precondition = stage.precondition(),
            reason = %reason,
            "Pipeline aborted: precondition not met"
        );
        self.outcome.abort(stage, reason);
        self.error = error;
        self
    }

    /// The outcome of a run in which no stage failed.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted the run, or
    /// [`PipelineError::Aborted`] when a stage stopped it without one.
    pub fn into_result(self) -> Result<PipelineRunOutcome> {
        if let Some(err) = self.error {
            return Err(err);
        }
        match self.outcome.failed_stage() {
            Some(stage) => {
                let reason = match self.outcome.status(stage) {
                    Some(StageStatus::Failed(reason)) => reason.clone(),
                    _ => String::new(),
                };
                Err(PipelineError::Aborted {
                    stage: stage.name(),
                    reason,
                }
                .into())
            }
            None => Ok(self.outcome),
        }
    }
}

/// Seed → verify → train → refresh → notify, stopping at the first failure.
pub struct Pipeline {
    seeder: Seeder,
    verifier: Verifier,
    forecaster: Forecaster,
    refresher: CacheRefreshNotifier,
    completion: CompletionNotifier,
    lock: Option<Arc<dyn RunLock>>,
    lock_name: String,
    lock_stale_after: Duration,
    run_id: String,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        store: Arc<dyn SalesStore>,
        cache: Arc<dyn CacheRefresher>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            seeder: Seeder::new(Arc::clone(&store), settings.retry),
            verifier: Verifier::new(Arc::clone(&store), settings.retry, settings.sample_size),
            forecaster: Forecaster::new(store, settings.model_version),
            refresher: CacheRefreshNotifier::new(cache, settings.cube),
            completion: CompletionNotifier,
            lock: None,
            lock_name: settings.lock_name,
            lock_stale_after: settings.lock_stale_after,
            run_id: Uuid::new_v4().to_string(),
        }
    }

    /// Guard runs with a shared lock so overlapping invocations back off.
    #[must_use]
    pub fn with_lock(mut self, lock: Arc<dyn RunLock>) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Replace the clock used to date forecasts.
    #[must_use]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.forecaster = self.forecaster.with_clock(today);
        self
    }

    /// Identifier of this pipeline instance, also used as lock holder.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Execute every stage once.
    pub async fn run(&self) -> PipelineRun {
        info!(run_id = %self.run_id, "Pipeline starting");

        if let Some(lock) = &self.lock {
            if let Err(err) = lock
                .acquire(&self.lock_name, &self.run_id, self.lock_stale_after)
                .await
            {
                warn!(error = %err, "Run lock unavailable, skipping this run");
                let mut run = PipelineRun::new();
                run.outcome.skip_remaining();
                run.error = Some(err);
                return run;
            }
        }

        let run = self.execute().await;

        if let Some(lock) = &self.lock {
            if let Err(err) = lock.release(&self.lock_name, &self.run_id).await {
                warn!(error = %err, "Failed to release run lock");
            }
        }

        if run.outcome.is_complete() {
            info!(run_id = %self.run_id, outcome = %run.outcome, "Pipeline finished");
        } else {
            warn!(run_id = %self.run_id, outcome = %run.outcome, "Pipeline did not complete");
        }

        run
    }

    async fn execute(&self) -> PipelineRun {
        let mut run = PipelineRun::new();

        match self.seeder.seed().await {
            Ok(true) => run.outcome.complete(Stage::Seeding, StageStatus::Ok),
            Ok(false) => return run.abort(Stage::Seeding, "seeder reported failure", None),
            Err(err) => return run.abort(Stage::Seeding, err.to_string(), Some(err)),
        }

        if !self.verifier.verify().await {
            return run.abort(Stage::Verifying, "historical data missing or unreadable", None);
        }
        run.outcome.complete(Stage::Verifying, StageStatus::Ok);

        match self.forecaster.train_and_predict().await {
            Ok(record) => {
                run.outcome.complete(Stage::Training, StageStatus::Ok);
                run.prediction = Some(record);
            }
            Err(err) => return run.abort(Stage::Training, err.to_string(), Some(err)),
        }

        match self.refresher.refresh(run.prediction.is_some()).await {
            Ok(report) => {
                let status = report
                    .warning()
                    .map_or(StageStatus::Ok, |w| StageStatus::Warning(w.to_string()));
                run.outcome.complete(Stage::Refreshing, status);
                run.refresh = Some(report);
            }
            Err(err) => return run.abort(Stage::Refreshing, err.to_string(), Some(err)),
        }

        let message = self.completion.notify(run.refresh.is_some());
        run.outcome.complete(Stage::Notifying, StageStatus::Ok);
        run.message = Some(message);

        run
    }
}
