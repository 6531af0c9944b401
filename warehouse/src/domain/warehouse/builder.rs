//! Warehouse build coordinator
//!
//! Runs every component in dependency order on one transaction and
//! assembles the report. Any error aborts the build; [`WarehouseBuilder::run`]
//! then rolls the transaction back so nothing from the attempt is visible.

use chrono::{Local, NaiveDate, Utc};
use sqlx::SqliteConnection;

use super::aggregates::build_aggregates;
use super::date_dimension::{build_date_dimension, date_range};
use super::error::WarehouseError;
use super::fact_loader::load_fact_sales;
use super::payment_method::build_payment_method_dimension;
use super::report::{BuildReport, STEP_DIM_DATE, STEP_DIM_PAYMENT_METHOD, STEP_FACT_SALES};
use super::scd::build_scd_dimension;
use crate::data::types::ScdDimension;
use crate::data::SqliteService;

/// Inputs fixed for the duration of one build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Effective date for new versions; retirements close the day before
    pub as_of: NaiveDate,
}

impl BuildOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// Build as of the local calendar date
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::today()
    }
}

pub struct WarehouseBuilder {
    options: BuildOptions,
}

impl WarehouseBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run all steps on `conn`. The caller owns commit and rollback.
    pub async fn build(&self, conn: &mut SqliteConnection) -> Result<BuildReport, WarehouseError> {
        let as_of = self.options.as_of;
        let mut report = BuildReport::new(as_of, Utc::now());

        for dim in [ScdDimension::CUSTOMERS, ScdDimension::PRODUCTS] {
            let outcome = build_scd_dimension(conn, &dim, as_of)
                .await
                .inspect_err(|e| log_failure(dim.table, e))?;
            report.record_scd(&dim, outcome);
        }

        match date_range(conn).await {
            Ok((start, end)) => {
                let rows = build_date_dimension(conn, start, end)
                    .await
                    .inspect_err(|e| log_failure(STEP_DIM_DATE, e))?;
                report.record_dimension(STEP_DIM_DATE, rows);
            }
            Err(WarehouseError::EmptyRange) => {
                tracing::warn!(step = STEP_DIM_DATE, "No transactions; skipping date dimension");
                report.record_skipped(STEP_DIM_DATE);
            }
            Err(e) => return Err(e),
        }

        let rows = build_payment_method_dimension(conn)
            .await
            .inspect_err(|e| log_failure(STEP_DIM_PAYMENT_METHOD, e))?;
        report.record_dimension(STEP_DIM_PAYMENT_METHOD, rows);

        let facts = load_fact_sales(conn)
            .await
            .inspect_err(|e| log_failure(STEP_FACT_SALES, e))?;
        if facts.deferred > 0 {
            tracing::warn!(deferred = facts.deferred, "Line items deferred to a later build");
        }
        report.record_facts(facts);

        let aggregates = build_aggregates(conn)
            .await
            .inspect_err(|e| log_failure("aggregates", e))?;
        report.record_aggregates(aggregates);

        Ok(report)
    }

    /// Build inside a fresh transaction: commit on success, roll back on error
    pub async fn run(&self, db: &SqliteService) -> Result<BuildReport, WarehouseError> {
        tracing::info!(as_of = %self.options.as_of, "Warehouse build started");
        let mut tx = db.begin().await?;

        match self.build(&mut *tx).await {
            Ok(report) => {
                tx.commit().await?;
                tracing::info!(
                    total_rows = report.total_rows(),
                    skipped = report.skipped_steps.len(),
                    "Warehouse build committed"
                );
                Ok(report)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "Rollback failed");
                }
                tracing::error!(error = %e, "Warehouse build rolled back");
                Err(e)
            }
        }
    }
}

fn log_failure(step: &str, error: &WarehouseError) {
    tracing::error!(step, error = %error, "Build step failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::production::fixtures::*;
    use crate::data::sqlite::repositories::{
        count_aggregates, count_dates, count_facts, count_versions, list_versions,
    };
    use crate::data::sqlite::test_pool;
    use crate::domain::warehouse::report::STEP_AGG_PRODUCT_SALES;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn builder(as_of: NaiveDate) -> WarehouseBuilder {
        WarehouseBuilder::new(BuildOptions::new(as_of))
    }

    async fn seed(db: &SqliteService) {
        let mut conn = db.pool().acquire().await.unwrap();
        insert_customer(&mut conn, "C1", true).await;
        insert_customer(&mut conn, "C2", true).await;
        insert_product(&mut conn, "P1", true).await;
        insert_product(&mut conn, "P2", true).await;
        insert_transaction(&mut conn, "T1", "C1", "2024-01-01", Some("Net Banking"), 45.0).await;
        insert_transaction(&mut conn, "T2", "C2", "2024-01-03", Some("Cash on Delivery"), 20.0).await;
        insert_item(&mut conn, "I1", "T1", "P1", 2, 15.0, 0.0, 30.0).await;
        insert_item(&mut conn, "I2", "T1", "P2", 1, 15.0, 0.0, 15.0).await;
        insert_item(&mut conn, "I3", "T2", "P1", 1, 25.0, 20.0, 20.0).await;
    }

    #[tokio::test]
    async fn test_full_build_report() {
        let db = SqliteService::from_pool(test_pool().await);
        seed(&db).await;

        let report = builder(day(2024, 2, 1)).run(&db).await.unwrap();

        assert_eq!(report.as_of, day(2024, 2, 1));
        assert_eq!(report.rows_affected("dim_customers"), Some(2));
        assert_eq!(report.rows_affected("dim_products"), Some(2));
        assert_eq!(report.rows_affected(STEP_DIM_DATE), Some(3));
        assert_eq!(report.rows_affected(STEP_DIM_PAYMENT_METHOD), Some(2));
        assert_eq!(report.rows_affected(STEP_FACT_SALES), Some(3));
        assert_eq!(report.rows_affected("agg_daily_sales"), Some(2));
        assert_eq!(report.rows_affected(STEP_AGG_PRODUCT_SALES), Some(2));
        assert_eq!(report.rows_affected("agg_customer_lifetime"), Some(2));
        assert_eq!(report.rows_affected("scd_dim_customers"), Some(0));
        assert!(report.skipped_steps.is_empty());
    }

    #[tokio::test]
    async fn test_second_build_is_noop() {
        let db = SqliteService::from_pool(test_pool().await);
        seed(&db).await;

        builder(day(2024, 2, 1)).run(&db).await.unwrap();
        let again = builder(day(2024, 2, 2)).run(&db).await.unwrap();

        assert_eq!(again.total_rows(), 0);
        let mut conn = db.pool().acquire().await.unwrap();
        assert_eq!(count_facts(&mut conn).await.unwrap(), 3);
        assert_eq!(count_dates(&mut conn).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_empty_production_skips_date_dimension() {
        let db = SqliteService::from_pool(test_pool().await);

        let report = builder(day(2024, 2, 1)).run(&db).await.unwrap();

        assert_eq!(report.skipped_steps, vec![STEP_DIM_DATE.to_string()]);
        assert_eq!(report.rows_affected(STEP_DIM_DATE), Some(0));
        assert_eq!(report.total_rows(), 0);
    }

    #[tokio::test]
    async fn test_retirement_excludes_later_items() {
        let db = SqliteService::from_pool(test_pool().await);
        seed(&db).await;
        builder(day(2024, 2, 1)).run(&db).await.unwrap();

        {
            let mut conn = db.pool().acquire().await.unwrap();
            set_product_active(&mut conn, "P2", false).await;
            insert_transaction(&mut conn, "T3", "C1", "2024-01-03", Some("UPI"), 15.0).await;
            insert_item(&mut conn, "I4", "T3", "P2", 1, 15.0, 0.0, 15.0).await;
        }

        let report = builder(day(2024, 3, 1)).run(&db).await.unwrap();
        assert_eq!(report.rows_affected("scd_dim_products"), Some(1));
        assert_eq!(report.rows_affected(STEP_FACT_SALES), Some(0));

        let mut conn = db.pool().acquire().await.unwrap();
        let versions = list_versions(&mut conn, &ScdDimension::PRODUCTS, "P2")
            .await
            .unwrap();
        assert!(!versions[0].is_current);
        assert_eq!(versions[0].end_date, Some(day(2024, 2, 29)));
        assert_eq!(count_facts(&mut conn).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_store_failure_rolls_back_everything() {
        let db = SqliteService::from_pool(test_pool().await);
        seed(&db).await;
        sqlx::query(
            r#"
            CREATE TRIGGER fail_fact_insert BEFORE INSERT ON fact_sales
            WHEN NEW.item_id = 'I3'
            BEGIN
                SELECT RAISE(ABORT, 'simulated store failure');
            END
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = builder(day(2024, 2, 1)).run(&db).await.unwrap_err();
        assert!(matches!(err, WarehouseError::Store(_)));

        let mut conn = db.pool().acquire().await.unwrap();
        assert_eq!(count_facts(&mut conn).await.unwrap(), 0);
        assert_eq!(count_aggregates(&mut conn).await.unwrap(), (0, 0, 0));
        assert_eq!(count_dates(&mut conn).await.unwrap(), 0);
        assert_eq!(
            count_versions(&mut conn, &ScdDimension::CUSTOMERS)
                .await
                .unwrap(),
            (0, 0)
        );
    }
}
