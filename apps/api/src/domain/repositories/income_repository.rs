use async_trait::async_trait;

use crate::domain::income::{Income, IncomeId, IncomePatch, NewIncome};

/// Repository trait for income records
///
/// Defines the contract the HTTP handlers delegate to. Errors are opaque
/// to callers; the handlers only ever report them as internal failures.
#[async_trait]
pub trait IncomeRepository: Send + Sync {
    /// Find all income whose timestamp lies in `[start, end]` (unix seconds)
    async fn get_income(&self, start: i64, end: i64) -> Result<Vec<Income>, String>;

    /// Remove an income entry
    ///
    /// Removing an id that does not exist is not an error.
    async fn remove_income(&self, id: &IncomeId) -> Result<(), String>;

    /// Replace description, timestamp and category of an income entry
    async fn edit_income(&self, id: &IncomeId, patch: IncomePatch) -> Result<(), String>;

    /// Store a new income entry and return its generated id
    async fn create_income(&self, income: NewIncome) -> Result<IncomeId, String>;
}
