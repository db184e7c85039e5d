use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::income::{Income, IncomeId, IncomePatch, NewIncome};
use crate::domain::repositories::IncomeRepository;

/// Row shape of the `income` table
#[derive(Debug, sqlx::FromRow)]
struct IncomeRow {
    id: String,
    amount: Decimal,
    description: String,
    timestamp: i64,
    category: String,
}

impl IncomeRow {
    fn into_income(self) -> Result<Income, String> {
        let id = IncomeId::new(self.id).ok_or_else(|| "Stored income has an empty id".to_string())?;
        Ok(Income {
            id,
            amount: self.amount,
            description: self.description,
            timestamp: self.timestamp,
            category: self.category,
        })
    }
}

/// PostgreSQL implementation of IncomeRepository
pub struct PostgresIncomeRepository {
    pool: PgPool,
}

impl PostgresIncomeRepository {
    /// Creates a new PostgresIncomeRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncomeRepository for PostgresIncomeRepository {
    async fn get_income(&self, start: i64, end: i64) -> Result<Vec<Income>, String> {
        let rows = sqlx::query_as::<_, IncomeRow>(
            r#"
            SELECT id, amount, description, timestamp, category
            FROM income
            WHERE timestamp >= $1 AND timestamp <= $2
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| format!("Failed to find income by range: {}", e))?;

        rows.into_iter().map(IncomeRow::into_income).collect()
    }

    async fn remove_income(&self, id: &IncomeId) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            DELETE FROM income WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to delete income: {}", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(income_id = %id, "Delete matched no income");
        }

        Ok(())
    }

    async fn edit_income(&self, id: &IncomeId, patch: IncomePatch) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            UPDATE income
            SET description = $2, timestamp = $3, category = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(&patch.description)
        .bind(patch.timestamp.seconds())
        .bind(&patch.category)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to update income: {}", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(income_id = %id, "Update matched no income");
        }

        Ok(())
    }

    async fn create_income(&self, income: NewIncome) -> Result<IncomeId, String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO income (id, amount, description, timestamp, category)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&id)
        .bind(income.amount.value())
        .bind(&income.description)
        .bind(income.timestamp.seconds())
        .bind(&income.category)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create income: {}", e))?;

        IncomeId::new(id).ok_or_else(|| "Generated an empty income id".to_string())
    }
}
