// Income domain module
// Contains the income record, edit/create payloads and value objects

#![allow(clippy::module_inception)]

pub mod income;
pub mod value_objects;

// Re-export main types for convenience
pub use income::{Income, IncomePatch, NewIncome};
pub use value_objects::{Amount, IncomeId, IncomeQueryRange, Timestamp};
