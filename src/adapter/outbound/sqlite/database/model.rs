//! Database model types for Diesel ORM.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{ml_prediccion_ventas, pipeline_locks, ventas_historicas};
use crate::domain::{HistoricalSalesRecord, PredictionRecord};

/// Database row for one month of sales history.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, Copy, PartialEq)]
#[diesel(table_name = ventas_historicas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoryRow {
    pub historical_period: i32,
    pub actual_sales: f64,
}

impl From<&HistoricalSalesRecord> for HistoryRow {
    fn from(record: &HistoricalSalesRecord) -> Self {
        Self {
            historical_period: record.period,
            actual_sales: record.actual_sales,
        }
    }
}

impl From<HistoryRow> for HistoricalSalesRecord {
    fn from(row: HistoryRow) -> Self {
        HistoricalSalesRecord::new(row.historical_period, row.actual_sales)
    }
}

/// Database row for the current forecast.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = ml_prediccion_ventas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PredictionRow {
    pub prediction_date: NaiveDate,
    pub predicted_period: i32,
    pub predicted_sales: f64,
    pub model_version: String,
}

impl From<&PredictionRecord> for PredictionRow {
    fn from(record: &PredictionRecord) -> Self {
        Self {
            prediction_date: record.prediction_date,
            predicted_period: record.predicted_period,
            predicted_sales: record.predicted_sales,
            model_version: record.model_version.clone(),
        }
    }
}

impl From<PredictionRow> for PredictionRecord {
    fn from(row: PredictionRow) -> Self {
        Self {
            prediction_date: row.prediction_date,
            predicted_period: row.predicted_period,
            predicted_sales: row.predicted_sales,
            model_version: row.model_version,
        }
    }
}

/// Database row for a run lock.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = pipeline_locks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LockRow {
    pub name: String,
    pub holder: String,
    /// RFC 3339 timestamp.
    pub acquired_at: String,
}
