//! Integration tests for the PostgreSQL income repository
//!
//! These tests need a migrated database reachable through `DATABASE_URL`
//! and are ignored by default. Run them with
//! `cargo test -- --ignored`.

use ledger_api::domain::income::{Amount, IncomeId, IncomePatch, NewIncome, Timestamp};
use ledger_api::domain::repositories::IncomeRepository;
use ledger_api::infrastructure::repositories::PostgresIncomeRepository;
use rust_decimal::Decimal;
use sqlx::PgPool;

const NOW: i64 = 1_700_000_000;

/// Set up test database connection pool
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn new_income(description: &str, timestamp: i64) -> NewIncome {
    NewIncome {
        amount: Amount::new(Decimal::new(10000, 2)).unwrap(),
        description: description.to_string(),
        timestamp: Timestamp::new(timestamp, NOW).unwrap(),
        category: "test".to_string(),
    }
}

/// Clean up test data
async fn cleanup(pool: &PgPool, ids: &[IncomeId]) {
    for id in ids {
        sqlx::query("DELETE FROM income WHERE id = $1")
            .bind(id.as_str())
            .execute(pool)
            .await
            .expect("Failed to cleanup income");
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_get_income_in_range() {
    let pool = setup_test_db().await;
    let repo = PostgresIncomeRepository::new(pool.clone());

    // Timestamps far in the past keep this range private to the test
    let first = repo.create_income(new_income("first", 101)).await.unwrap();
    let second = repo.create_income(new_income("second", 102)).await.unwrap();
    let outside = repo.create_income(new_income("outside", 150)).await.unwrap();

    let found = repo.get_income(101, 102).await.unwrap();
    let ids: Vec<&IncomeId> = found.iter().map(|i| &i.id).collect();

    assert_eq!(ids, vec![&first, &second]);
    assert_eq!(found[0].amount, Decimal::new(10000, 2));
    assert_eq!(found[0].description, "first");

    cleanup(&pool, &[first, second, outside]).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_edit_income() {
    let pool = setup_test_db().await;
    let repo = PostgresIncomeRepository::new(pool.clone());

    let id = repo.create_income(new_income("before", 201)).await.unwrap();

    let patch = IncomePatch {
        description: "after".to_string(),
        timestamp: Timestamp::new(202, NOW).unwrap(),
        category: "edited".to_string(),
    };
    repo.edit_income(&id, patch).await.unwrap();

    let found = repo.get_income(202, 202).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);
    assert_eq!(found[0].description, "after");
    assert_eq!(found[0].category, "edited");

    cleanup(&pool, &[id]).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_remove_income_is_idempotent() {
    let pool = setup_test_db().await;
    let repo = PostgresIncomeRepository::new(pool);

    let id = repo.create_income(new_income("gone", 301)).await.unwrap();

    repo.remove_income(&id).await.unwrap();
    repo.remove_income(&id).await.unwrap();

    assert!(repo.get_income(301, 301).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_edit_unknown_income_is_not_an_error() {
    let pool = setup_test_db().await;
    let repo = PostgresIncomeRepository::new(pool);

    let patch = IncomePatch {
        description: String::new(),
        timestamp: Timestamp::new(0, NOW).unwrap(),
        category: String::new(),
    };

    let id = IncomeId::new("does-not-exist").unwrap();
    assert!(repo.edit_income(&id, patch).await.is_ok());
}
