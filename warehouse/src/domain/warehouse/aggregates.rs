//! Insert-once aggregate rollups over the fact table

use serde::Serialize;
use sqlx::SqliteConnection;

use super::error::WarehouseError;
use crate::data::sqlite::repositories::{
    insert_customer_lifetime, insert_daily_sales, insert_product_sales,
};

/// New aggregate rows per rollup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateOutcome {
    pub daily: u64,
    pub product: u64,
    pub customer_lifetime: u64,
}

/// Roll up every grouping key that has no aggregate row yet.
///
/// Rows already present are snapshots: later facts for the same key do not
/// change them.
pub async fn build_aggregates(conn: &mut SqliteConnection) -> Result<AggregateOutcome, WarehouseError> {
    let daily = insert_daily_sales(conn).await?;
    let product = insert_product_sales(conn).await?;
    let customer_lifetime = insert_customer_lifetime(conn).await?;

    tracing::debug!(daily, product, customer_lifetime, "Aggregates built");
    Ok(AggregateOutcome {
        daily,
        product,
        customer_lifetime,
    })
}
