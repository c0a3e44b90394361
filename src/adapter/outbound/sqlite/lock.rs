//! SQLite-backed run lock.
//!
//! One row per lock name in `pipeline_locks`. Acquisition runs inside an
//! immediate transaction so two processes cannot both see the lock free.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use tracing::{debug, warn};

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::LockRow;
use crate::adapter::outbound::sqlite::database::schema::pipeline_locks;
use crate::error::{Error, Result};
use crate::port::outbound::lock::{LockGrant, RunLock};

enum Decision {
    Granted(LockGrant),
    Held(String),
}

/// Run lock stored in the same database as the sales tables.
pub struct SqliteRunLock {
    pool: DbPool,
}

impl SqliteRunLock {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// A lock is stale once it is older than `stale_after`. Unreadable
/// timestamps count as stale.
fn is_stale(acquired_at: &str, now: DateTime<Utc>, stale_after: Duration) -> bool {
    let Ok(acquired) = DateTime::parse_from_rfc3339(acquired_at) else {
        return true;
    };
    chrono::Duration::from_std(stale_after)
        .map_or(false, |ttl| now.signed_duration_since(acquired) >= ttl)
}

#[async_trait]
impl RunLock for SqliteRunLock {
    async fn acquire(&self, name: &str, holder: &str, stale_after: Duration) -> Result<LockGrant> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let now = Utc::now();
        let row = LockRow {
            name: name.to_string(),
            holder: holder.to_string(),
            acquired_at: now.to_rfc3339(),
        };

        let decision = conn
            .immediate_transaction::<_, DieselError, _>(|conn| {
                let current: Option<LockRow> = pipeline_locks::table
                    .find(name)
                    .select(LockRow::as_select())
                    .first(conn)
                    .optional()?;

                match current {
                    None => {
                        diesel::insert_into(pipeline_locks::table)
                            .values(&row)
                            .execute(conn)?;
                        Ok(Decision::Granted(LockGrant::Fresh))
                    }
                    Some(current) if current.holder == holder => {
                        diesel::update(pipeline_locks::table.find(name))
                            .set(&row)
                            .execute(conn)?;
                        Ok(Decision::Granted(LockGrant::Fresh))
                    }
                    Some(current) if is_stale(&current.acquired_at, now, stale_after) => {
                        diesel::update(pipeline_locks::table.find(name))
                            .set(&row)
                            .execute(conn)?;
                        Ok(Decision::Granted(LockGrant::Stolen {
                            previous_holder: current.holder,
                        }))
                    }
                    Some(current) => Ok(Decision::Held(current.holder)),
                }
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        match decision {
            Decision::Granted(grant) => {
                if let LockGrant::Stolen { previous_holder } = &grant {
                    warn!(lock = name, previous_holder, "Took over stale run lock");
                } else {
                    debug!(lock = name, holder, "Run lock acquired");
                }
                Ok(grant)
            }
            Decision::Held(holder) => Err(Error::RunInProgress { holder }),
        }
    }

    async fn release(&self, name: &str, holder: &str) -> Result<bool> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let deleted = diesel::delete(
            pipeline_locks::table
                .filter(pipeline_locks::name.eq(name))
                .filter(pipeline_locks::holder.eq(holder)),
        )
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }
}
