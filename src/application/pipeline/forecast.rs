//! Model training and forecast persistence.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{error, info};

use crate::domain::{next_period, round_to_cents, LinearModel, PredictionRecord};
use crate::error::{PipelineError, Result};
use crate::port::outbound::sales::SalesStore;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fits the sales trend and stores the next-period forecast.
pub struct Forecaster {
    store: Arc<dyn SalesStore>,
    model_version: String,
    today: fn() -> NaiveDate,
}

impl Forecaster {
    #[must_use]
    pub fn new(store: Arc<dyn SalesStore>, model_version: impl Into<String>) -> Self {
        Self {
            store,
            model_version: model_version.into(),
            today: local_today,
        }
    }

    /// Replace the clock used to stamp forecasts.
    #[must_use]
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Train on the full history and replace the stored forecast.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NoTrainingData`] when history is empty; storage
    /// and validation errors otherwise. Nothing here is retried.
    pub async fn train_and_predict(&self) -> Result<PredictionRecord> {
        info!("Loading historical data for training");
        let history = self.store.load_history().await?;

        let Some(period) = next_period(&history)? else {
            return Err(PipelineError::NoTrainingData.into());
        };

        info!(rows = history.len(), "Training linear model");
        let model = LinearModel::fit(&history)?;
        let predicted_sales = round_to_cents(model.predict(period));

        let record = PredictionRecord {
            prediction_date: (self.today)(),
            predicted_period: period,
            predicted_sales,
            model_version: self.model_version.clone(),
        };

        if let Err(err) = self.store.replace_prediction(&record).await {
            error!(error = %err, "Failed to store forecast");
            return Err(err);
        }

        info!(
            period,
            predicted_sales,
            slope = model.slope,
            intercept = model.intercept,
            model_version = %record.model_version,
            "Forecast stored"
        );

        Ok(record)
    }
}
