//! Idempotent sales fact loader

use serde::Serialize;
use sqlx::SqliteConnection;

use super::error::WarehouseError;
use crate::data::sqlite::repositories::{count_unloaded_items, insert_new_facts};

/// Row counts from one fact load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactLoadOutcome {
    /// Fact rows appended
    pub inserted: u64,
    /// Line items still unloaded because a current customer, current product
    /// or date row was missing
    pub deferred: u64,
}

/// Append facts for every line item not yet loaded
pub async fn load_fact_sales(conn: &mut SqliteConnection) -> Result<FactLoadOutcome, WarehouseError> {
    let inserted = insert_new_facts(conn).await?;
    let deferred = count_unloaded_items(conn).await?;

    if deferred > 0 {
        tracing::debug!(deferred, "Line items deferred for missing dimension rows");
    }
    tracing::debug!(inserted, "Fact load complete");
    Ok(FactLoadOutcome { inserted, deferred })
}
