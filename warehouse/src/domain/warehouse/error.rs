//! Warehouse build error types

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::SqliteError;

#[derive(Error, Debug)]
pub enum WarehouseError {
    /// No production transactions, so no calendar range can be derived
    #[error("No transactions found; cannot derive a date range")]
    EmptyRange,

    /// The build date has no previous day to close retired versions on
    #[error("Build date {0} has no previous day")]
    InvalidAsOf(NaiveDate),

    /// A dimension ended a step with more than one current row per key
    #[error("{dimension} has multiple current rows for business keys: {}", .keys.join(", "))]
    InvariantViolation {
        dimension: &'static str,
        keys: Vec<String>,
    },

    #[error(transparent)]
    Store(#[from] SqliteError),
}

impl From<sqlx::Error> for WarehouseError {
    fn from(e: sqlx::Error) -> Self {
        Self::Store(SqliteError::Database(e))
    }
}

impl WarehouseError {
    /// Whether retrying the whole build later may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Store(e) => e.is_transient(),
            _ => false,
        }
    }
}
