//! Per-run stage bookkeeping.
//!
//! A [`PipelineRunOutcome`] is filled strictly in [`Stage::ALL`] order.
//! Once a stage is aborted every later stage is recorded as skipped and
//! nothing else can be appended, so a failure is never followed by an
//! `Ok` entry.

use std::fmt;

use serde::Serialize;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Seeding,
    Verifying,
    Training,
    Refreshing,
    Notifying,
}

impl Stage {
    /// Every stage, in the order the pipeline runs them.
    pub const ALL: [Stage; 5] = [
        Stage::Seeding,
        Stage::Verifying,
        Stage::Training,
        Stage::Refreshing,
        Stage::Notifying,
    ];

    /// Stable lowercase name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Seeding => "seeding",
            Stage::Verifying => "verifying",
            Stage::Training => "training",
            Stage::Refreshing => "refreshing",
            Stage::Notifying => "notifying",
        }
    }

    /// What this stage guarantees to the stages after it.
    #[must_use]
    pub const fn precondition(self) -> &'static str {
        match self {
            Stage::Seeding => "historical data seeded",
            Stage::Verifying => "source data verified",
            Stage::Training => "forecast trained and stored",
            Stage::Refreshing => "cache refresh attempted",
            Stage::Notifying => "completion reported",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum StageStatus {
    Ok,
    /// Completed, but a best-effort side effect did not happen.
    Warning(String),
    Failed(String),
    Skipped,
}

impl StageStatus {
    /// Whether downstream stages may run after this one.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, StageStatus::Ok | StageStatus::Warning(_))
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            StageStatus::Ok => "ok",
            StageStatus::Warning(_) => "warning",
            StageStatus::Failed(_) => "failed",
            StageStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageStatus::Warning(detail) | StageStatus::Failed(detail) => {
                write!(f, "{} ({detail})", self.label())
            }
            _ => f.write_str(self.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub status: StageStatus,
}

/// Ordered stage results of one pipeline invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineRunOutcome {
    records: Vec<StageRecord>,
}

impl PipelineRunOutcome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stage expected to be recorded next, if any remain.
    #[must_use]
    pub fn next_stage(&self) -> Option<Stage> {
        Stage::ALL.get(self.records.len()).copied()
    }

    /// Record a successful stage.
    ///
    /// Ignored unless `stage` is the next expected one and `status` is a
    /// success; failures must go through [`Self::abort`].
    pub fn complete(&mut self, stage: Stage, status: StageStatus) {
        if self.next_stage() != Some(stage) || !status.is_success() {
            return;
        }
        self.records.push(StageRecord { stage, status });
    }

    /// Record `stage` as failed and every later stage as skipped.
    pub fn abort(&mut self, stage: Stage, reason: impl Into<String>) {
        if self.next_stage() != Some(stage) {
            return;
        }
        self.records.push(StageRecord {
            stage,
            status: StageStatus::Failed(reason.into()),
        });
        self.skip_remaining();
    }

    /// Record every stage not yet recorded as skipped.
    pub fn skip_remaining(&mut self) {
        while let Some(stage) = self.next_stage() {
            self.records.push(StageRecord {
                stage,
                status: StageStatus::Skipped,
            });
        }
    }

    #[must_use]
    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }

    #[must_use]
    pub fn status(&self, stage: Stage) -> Option<&StageStatus> {
        self.records.get(stage.index()).map(|r| &r.status)
    }

    /// The stage that aborted the run, if one did.
    #[must_use]
    pub fn failed_stage(&self) -> Option<Stage> {
        self.records
            .iter()
            .find(|r| matches!(r.status, StageStatus::Failed(_)))
            .map(|r| r.stage)
    }

    /// True when every stage ran and none failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.records.len() == Stage::ALL.len() && self.records.iter().all(|r| r.status.is_success())
    }

    /// Warnings raised by best-effort stages.
    pub fn warnings(&self) -> impl Iterator<Item = (Stage, &str)> {
        self.records.iter().filter_map(|r| match &r.status {
            StageStatus::Warning(msg) => Some((r.stage, msg.as_str())),
            _ => None,
        })
    }

    /// No success entry follows a failed or skipped one.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        let mut halted = false;
        for record in &self.records {
            match record.status {
                StageStatus::Ok | StageStatus::Warning(_) if halted => return false,
                StageStatus::Failed(_) | StageStatus::Skipped => halted = true,
                _ => {}
            }
        }
        true
    }
}

impl fmt::Display for PipelineRunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", record.stage, record.status)?;
        }
        Ok(())
    }
}
