use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an income entry
///
/// Opaque to this service: the value is whatever the repository issued.
///
/// # Invariants
/// - Must not be empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncomeId(String);

impl IncomeId {
    /// Creates a new IncomeId
    ///
    /// # Returns
    /// * `Some(IncomeId)` - If the id is non-empty
    /// * `None` - If the id is empty
    ///
    /// # Example
    /// ```
    /// use ledger_api::domain::income::IncomeId;
    ///
    /// assert!(IncomeId::new("123").is_some());
    /// assert!(IncomeId::new("").is_none());
    /// ```
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(IncomeId(id))
        }
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Time range for income queries, both ends in unix seconds
///
/// No ordering is enforced between `start` and `end`; the repository
/// decides what an inverted range means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeQueryRange {
    pub start: i64,
    pub end: i64,
}

/// Unix timestamp (seconds) that is not negative and not in the future
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Validates `seconds` against the current time `now` (also seconds)
    ///
    /// Both bounds are inclusive: `0` and `now` are accepted.
    ///
    /// # Example
    /// ```
    /// use ledger_api::domain::income::Timestamp;
    ///
    /// assert!(Timestamp::new(0, 100).is_some());
    /// assert!(Timestamp::new(100, 100).is_some());
    /// assert!(Timestamp::new(101, 100).is_none());
    /// assert!(Timestamp::new(-1, 100).is_none());
    /// ```
    pub fn new(seconds: i64, now: i64) -> Option<Self> {
        if (0..=now).contains(&seconds) {
            Some(Timestamp(seconds))
        } else {
            None
        }
    }

    /// Returns the raw number of seconds
    pub fn seconds(&self) -> i64 {
        self.0
    }
}

/// Exclusive upper bound of a `NUMERIC(14, 2)` column: 10^12
const AMOUNT_LIMIT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Income amount
///
/// # Invariants
/// - Strictly positive
/// - At most two decimal places
/// - Below 10^12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new Amount
    ///
    /// # Returns
    /// * `Ok(Amount)` - If the value is positive, has at most two decimal
    ///   places and is below 10^12
    /// * `Err(String)` - Otherwise
    pub fn new(value: Decimal) -> Result<Self, String> {
        if value <= Decimal::ZERO {
            return Err(format!("Amount must be positive, got {}", value));
        }
        if value.normalize().scale() > 2 {
            return Err(format!("Amount has more than two decimal places: {}", value));
        }
        if value >= AMOUNT_LIMIT {
            return Err(format!("Amount is too large: {}", value));
        }
        Ok(Amount(value))
    }

    /// Returns the decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }
}
