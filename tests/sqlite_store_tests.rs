mod harness;

use std::sync::Arc;
use std::time::Duration;

use harness::temp_db::TempDb;
use salesforecast::adapter::outbound::sqlite::{SqliteRunLock, SqliteSalesStore};
use salesforecast::application::pipeline::{RetryPolicy, Seeder, Verifier};
use salesforecast::domain::{seed_records, HistoricalSalesRecord};
use salesforecast::error::Error;
use salesforecast::port::outbound::lock::{LockGrant, RunLock};
use salesforecast::port::outbound::sales::SalesStore;

fn no_backoff() -> RetryPolicy {
    RetryPolicy::new(3, Duration::ZERO)
}

#[tokio::test]
async fn verifier_returns_false_when_table_missing() {
    let db = TempDb::create("verify-missing");
    let store = Arc::new(SqliteSalesStore::new(db.pool().clone()));

    let verifier = Verifier::new(store.clone(), no_backoff(), 5);
    assert!(!verifier.verify().await);
    assert!(store.count_history().await.is_err());
}

#[tokio::test]
async fn seeding_twice_leaves_ten_rows() {
    let db = TempDb::create("seed-idempotent");
    let store = Arc::new(SqliteSalesStore::new(db.pool().clone()));
    let seeder = Seeder::new(store.clone(), no_backoff());

    assert!(seeder.seed().await.unwrap());
    assert!(seeder.seed().await.unwrap());

    assert_eq!(store.load_history().await.unwrap(), seed_records());
    assert!(Verifier::new(store, no_backoff(), 5).verify().await);
}

#[tokio::test]
async fn seeding_fills_empty_existing_table() {
    let db = TempDb::create("seed-empty");
    let store = Arc::new(SqliteSalesStore::new(db.pool().clone()));
    store.replace_history(&[]).await.unwrap();
    assert_eq!(store.count_history().await.unwrap(), 0);

    assert!(Seeder::new(store.clone(), no_backoff()).seed().await.unwrap());
    assert_eq!(store.count_history().await.unwrap(), 10);
}

#[tokio::test]
async fn history_is_returned_in_period_order() {
    let db = TempDb::create("history-order");
    let store = SqliteSalesStore::new(db.pool().clone());
    store
        .replace_history(&[
            HistoricalSalesRecord::new(3, 30.0),
            HistoricalSalesRecord::new(1, 10.0),
            HistoricalSalesRecord::new(2, 20.0),
        ])
        .await
        .unwrap();

    let periods: Vec<i32> = store
        .load_history()
        .await
        .unwrap()
        .iter()
        .map(|r| r.period)
        .collect();
    assert_eq!(periods, vec![1, 2, 3]);
    assert_eq!(store.sample_history(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_append_is_rejected() {
    let db = TempDb::create("append-dup");
    let store = SqliteSalesStore::new(db.pool().clone());
    store.replace_history(&seed_records()).await.unwrap();

    let result = store
        .append_history(&[HistoricalSalesRecord::new(1, 999.0)])
        .await;
    assert!(matches!(result, Err(Error::Database(_))));
    assert_eq!(store.count_history().await.unwrap(), 10);
}

#[tokio::test]
async fn only_one_holder_wins_concurrent_acquire() {
    let db = TempDb::create("lock-race");
    let lock = Arc::new(SqliteRunLock::new(db.pool().clone()));
    let stale_after = Duration::from_secs(3600);

    let (a, b) = tokio::join!(
        lock.acquire("sales-forecast", "run-a", stale_after),
        lock.acquire("sales-forecast", "run-b", stale_after),
    );

    let winners = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn stale_lock_is_taken_over() {
    let db = TempDb::create("lock-stale");
    let lock = SqliteRunLock::new(db.pool().clone());

    lock.acquire("sales-forecast", "crashed-run", Duration::from_secs(3600))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let grant = lock
        .acquire("sales-forecast", "new-run", Duration::from_millis(1))
        .await
        .unwrap();
    assert_eq!(
        grant,
        LockGrant::Stolen {
            previous_holder: "crashed-run".into()
        }
    );
    assert!(!lock.release("sales-forecast", "crashed-run").await.unwrap());
    assert!(lock.release("sales-forecast", "new-run").await.unwrap());
}
