//! SQLite sales store implementation.
//!
//! Persists the sales history and the current forecast using Diesel.
//! Both tables are created lazily: the history table by the seeding
//! fallback, the forecast table on every replace.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{HistoryRow, PredictionRow};
use crate::adapter::outbound::sqlite::database::schema::{
    ml_prediccion_ventas, ventas_historicas, CREATE_ML_PREDICCION_VENTAS, CREATE_VENTAS_HISTORICAS,
};
use crate::domain::{HistoricalSalesRecord, PredictionRecord};
use crate::error::{Error, Result};
use crate::port::outbound::sales::SalesStore;

type SqlitePooled = PooledConnection<ConnectionManager<SqliteConnection>>;

/// SQLite-backed [`SalesStore`].
pub struct SqliteSalesStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteSalesStore {
    /// Create a new store over the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<SqlitePooled> {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

fn db_error(err: DieselError) -> Error {
    Error::Database(err.to_string())
}

/// Like [`db_error`], but reports a missing history table as such.
fn history_error(err: DieselError) -> Error {
    if is_missing_table(&err) {
        Error::MissingTable {
            table: "ventas_historicas",
        }
    } else {
        db_error(err)
    }
}

/// True when SQLite reported a reference to a table that does not exist.
fn is_missing_table(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::Unknown, info) => {
            info.message().contains("no such table")
        }
        _ => false,
    }
}

fn insert_history(conn: &mut SqliteConnection, rows: &[HistoryRow]) -> QueryResult<usize> {
    if rows.is_empty() {
        return Ok(0);
    }
    diesel::insert_into(ventas_historicas::table)
        .values(rows)
        .execute(conn)
}

#[async_trait]
impl SalesStore for SqliteSalesStore {
    async fn count_history(&self) -> Result<i64> {
        let mut conn = self.conn()?;
        ventas_historicas::table
            .count()
            .get_result(&mut conn)
            .map_err(history_error)
    }

    async fn sample_history(&self, limit: i64) -> Result<Vec<HistoricalSalesRecord>> {
        let mut conn = self.conn()?;
        let rows: Vec<HistoryRow> = ventas_historicas::table
            .order(ventas_historicas::historical_period.asc())
            .limit(limit)
            .select(HistoryRow::as_select())
            .load(&mut conn)
            .map_err(history_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn load_history(&self) -> Result<Vec<HistoricalSalesRecord>> {
        let mut conn = self.conn()?;
        let rows: Vec<HistoryRow> = ventas_historicas::table
            .order(ventas_historicas::historical_period.asc())
            .select(HistoryRow::as_select())
            .load(&mut conn)
            .map_err(history_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn append_history(&self, records: &[HistoricalSalesRecord]) -> Result<usize> {
        let rows: Vec<HistoryRow> = records.iter().map(HistoryRow::from).collect();
        let mut conn = self.conn()?;
        insert_history(&mut conn, &rows).map_err(history_error)
    }

    async fn replace_history(&self, records: &[HistoricalSalesRecord]) -> Result<usize> {
        let rows: Vec<HistoryRow> = records.iter().map(HistoryRow::from).collect();
        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, DieselError, _>(|conn| {
            diesel::sql_query("DROP TABLE IF EXISTS ventas_historicas").execute(conn)?;
            diesel::sql_query(CREATE_VENTAS_HISTORICAS).execute(conn)?;
            insert_history(conn, &rows)
        })
        .map_err(db_error)
    }

    async fn replace_prediction(&self, record: &PredictionRecord) -> Result<()> {
        let row = PredictionRow::from(record);
        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, DieselError, _>(|conn| {
            diesel::sql_query("DROP TABLE IF EXISTS ml_prediccion_ventas").execute(conn)?;
            diesel::sql_query(CREATE_ML_PREDICCION_VENTAS).execute(conn)?;
            diesel::insert_into(ml_prediccion_ventas::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
        .map_err(db_error)
    }

    async fn current_prediction(&self) -> Result<Option<PredictionRecord>> {
        let mut conn = self.conn()?;
        let row = ml_prediccion_ventas::table
            .select(PredictionRow::as_select())
            .first::<PredictionRow>(&mut conn)
            .optional();

        match row {
            Ok(row) => Ok(row.map(Into::into)),
            Err(err) if is_missing_table(&err) => Ok(None),
            Err(err) => Err(db_error(err)),
        }
    }
}
