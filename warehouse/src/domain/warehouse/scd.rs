//! Type 2 slowly changing dimension builder
//!
//! New active business keys get a current version effective on the build
//! date. Current versions whose source row went inactive are closed the day
//! before. Keys already represented are left alone.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqliteConnection;

use super::error::WarehouseError;
use crate::data::sqlite::repositories::{
    business_keys_with_multiple_current, insert_new_versions, retire_inactive_versions,
};
use crate::data::types::ScdDimension;

/// Row counts from one SCD pass over a dimension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScdOutcome {
    pub inserted: u64,
    pub retired: u64,
}

/// Apply Type 2 versioning to `dim` as of `as_of`
pub async fn build_scd_dimension(
    conn: &mut SqliteConnection,
    dim: &ScdDimension,
    as_of: NaiveDate,
) -> Result<ScdOutcome, WarehouseError> {
    let end_date = as_of.pred_opt().ok_or(WarehouseError::InvalidAsOf(as_of))?;

    let inserted = insert_new_versions(conn, dim, as_of).await?;
    let retired = retire_inactive_versions(conn, dim, end_date).await?;

    let duplicated = business_keys_with_multiple_current(conn, dim).await?;
    if !duplicated.is_empty() {
        return Err(WarehouseError::InvariantViolation {
            dimension: dim.table,
            keys: duplicated,
        });
    }

    tracing::debug!(dimension = dim.table, inserted, retired, "SCD pass complete");
    Ok(ScdOutcome { inserted, retired })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::production::fixtures::*;
    use crate::data::sqlite::repositories::{count_versions, list_versions};
    use crate::data::sqlite::test_pool;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_rerun_with_unchanged_source_is_noop() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert_customer(&mut conn, "C1", true).await;
        insert_customer(&mut conn, "C2", true).await;
        insert_customer(&mut conn, "C3", false).await;

        let dim = ScdDimension::CUSTOMERS;
        let first = build_scd_dimension(&mut conn, &dim, day(2024, 6, 1))
            .await
            .unwrap();
        let second = build_scd_dimension(&mut conn, &dim, day(2024, 6, 2))
            .await
            .unwrap();

        assert_eq!(first, ScdOutcome { inserted: 2, retired: 0 });
        assert_eq!(second, ScdOutcome::default());
        assert_eq!(count_versions(&mut conn, &dim).await.unwrap(), (2, 2));
    }

    #[tokio::test]
    async fn test_retired_product_closes_day_before_build() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert_product(&mut conn, "P1", true).await;

        let dim = ScdDimension::PRODUCTS;
        build_scd_dimension(&mut conn, &dim, day(2024, 6, 1))
            .await
            .unwrap();
        set_product_active(&mut conn, "P1", false).await;

        let outcome = build_scd_dimension(&mut conn, &dim, day(2024, 7, 1))
            .await
            .unwrap();
        assert_eq!(outcome, ScdOutcome { inserted: 0, retired: 1 });

        let versions = list_versions(&mut conn, &dim, "P1").await.unwrap();
        assert_eq!(versions.len(), 1);
        assert!(!versions[0].is_current);
        assert_eq!(versions[0].effective_date, day(2024, 6, 1));
        assert_eq!(versions[0].end_date, Some(day(2024, 6, 30)));
    }

    #[tokio::test]
    async fn test_reactivated_key_is_not_reversioned() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        insert_customer(&mut conn, "C1", true).await;

        let dim = ScdDimension::CUSTOMERS;
        build_scd_dimension(&mut conn, &dim, day(2024, 6, 1))
            .await
            .unwrap();
        set_customer_active(&mut conn, "C1", false).await;
        build_scd_dimension(&mut conn, &dim, day(2024, 6, 10))
            .await
            .unwrap();
        set_customer_active(&mut conn, "C1", true).await;

        let outcome = build_scd_dimension(&mut conn, &dim, day(2024, 6, 20))
            .await
            .unwrap();
        assert_eq!(outcome, ScdOutcome::default());
        assert_eq!(count_versions(&mut conn, &dim).await.unwrap(), (1, 0));
    }

    #[tokio::test]
    async fn test_at_most_one_current_row_per_key() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let dim = ScdDimension::PRODUCTS;

        for (i, as_of) in [day(2024, 1, 1), day(2024, 2, 1), day(2024, 3, 1)]
            .into_iter()
            .enumerate()
        {
            insert_product(&mut conn, &format!("P{}", i), true).await;
            if i > 0 {
                set_product_active(&mut conn, &format!("P{}", i - 1), false).await;
            }
            build_scd_dimension(&mut conn, &dim, as_of).await.unwrap();
            assert!(
                business_keys_with_multiple_current(&mut conn, &dim)
                    .await
                    .unwrap()
                    .is_empty()
            );
        }
        assert_eq!(count_versions(&mut conn, &dim).await.unwrap(), (3, 1));
    }

    #[tokio::test]
    async fn test_minimum_date_is_rejected() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let err = build_scd_dimension(&mut conn, &ScdDimension::CUSTOMERS, NaiveDate::MIN)
            .await
            .unwrap_err();
        assert!(matches!(err, WarehouseError::InvalidAsOf(_)));
    }

    #[tokio::test]
    async fn test_duplicate_current_rows_abort() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        sqlx::query("DROP INDEX idx_dim_customers_current")
            .execute(&mut *conn)
            .await
            .unwrap();
        for _ in 0..2 {
            sqlx::query(
                "INSERT INTO dim_customers (customer_id, is_current, effective_date) VALUES ('C9', 1, '2024-01-01')",
            )
            .execute(&mut *conn)
            .await
            .unwrap();
        }

        let err = build_scd_dimension(&mut conn, &ScdDimension::CUSTOMERS, day(2024, 6, 1))
            .await
            .unwrap_err();
        match err {
            WarehouseError::InvariantViolation { dimension, keys } => {
                assert_eq!(dimension, "dim_customers");
                assert_eq!(keys, vec!["C9".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
