use rust_decimal::Decimal;

use super::value_objects::{Amount, IncomeId, Timestamp};

/// Income record as stored by the repository
///
/// This is the raw representation. Handlers never serialize it directly,
/// the list endpoint runs every record through an injected mapping
/// function first.
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    pub id: IncomeId,
    pub amount: Decimal,
    pub description: String,
    /// Unix seconds
    pub timestamp: i64,
    pub category: String,
}

/// Fields replaced by an edit
///
/// All three fields are always written together; the amount is not
/// editable through this patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomePatch {
    pub description: String,
    pub timestamp: Timestamp,
    pub category: String,
}

/// A validated income entry that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub amount: Amount,
    pub description: String,
    pub timestamp: Timestamp,
    pub category: String,
}
