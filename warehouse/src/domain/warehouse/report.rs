//! Build report returned by a successful warehouse build

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::aggregates::AggregateOutcome;
use super::fact_loader::FactLoadOutcome;
use super::scd::ScdOutcome;
use crate::data::types::ScdDimension;

pub const STEP_DIM_DATE: &str = "dim_date";
pub const STEP_DIM_PAYMENT_METHOD: &str = "dim_payment_method";
pub const STEP_FACT_SALES: &str = "fact_sales";
pub const STEP_AGG_DAILY_SALES: &str = "agg_daily_sales";
pub const STEP_AGG_PRODUCT_SALES: &str = "agg_product_sales";
pub const STEP_AGG_CUSTOMER_LIFETIME: &str = "agg_customer_lifetime";

/// Prefix for SCD retirement counts in [`BuildReport::rows_affected`]
const SCD_STEP_PREFIX: &str = "scd_";

/// Per-step row counts for one committed build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub warehouse_build_timestamp: DateTime<Utc>,
    pub as_of: NaiveDate,
    pub dimensions_built: BTreeMap<String, u64>,
    pub fact_tables_built: BTreeMap<String, u64>,
    pub aggregates_built: BTreeMap<String, u64>,
    /// Versions retired per SCD dimension
    pub scd_updates: BTreeMap<String, u64>,
    #[serde(default)]
    pub skipped_steps: Vec<String>,
}

impl BuildReport {
    pub fn new(as_of: NaiveDate, timestamp: DateTime<Utc>) -> Self {
        Self {
            warehouse_build_timestamp: timestamp,
            as_of,
            dimensions_built: BTreeMap::new(),
            fact_tables_built: BTreeMap::new(),
            aggregates_built: BTreeMap::new(),
            scd_updates: BTreeMap::new(),
            skipped_steps: Vec::new(),
        }
    }

    pub fn record_scd(&mut self, dim: &ScdDimension, outcome: ScdOutcome) {
        self.dimensions_built
            .insert(dim.table.to_string(), outcome.inserted);
        self.scd_updates.insert(dim.table.to_string(), outcome.retired);
    }

    pub fn record_dimension(&mut self, step: &str, rows: u64) {
        self.dimensions_built.insert(step.to_string(), rows);
    }

    pub fn record_facts(&mut self, outcome: FactLoadOutcome) {
        self.fact_tables_built
            .insert(STEP_FACT_SALES.to_string(), outcome.inserted);
    }

    pub fn record_aggregates(&mut self, outcome: AggregateOutcome) {
        self.aggregates_built
            .insert(STEP_AGG_DAILY_SALES.to_string(), outcome.daily);
        self.aggregates_built
            .insert(STEP_AGG_PRODUCT_SALES.to_string(), outcome.product);
        self.aggregates_built.insert(
            STEP_AGG_CUSTOMER_LIFETIME.to_string(),
            outcome.customer_lifetime,
        );
    }

    /// Mark a step as skipped; it still reports zero rows
    pub fn record_skipped(&mut self, step: &str) {
        self.dimensions_built.insert(step.to_string(), 0);
        self.skipped_steps.push(step.to_string());
    }

    /// Rows affected by a named step. SCD retirements are looked up as
    /// `scd_<table>`.
    pub fn rows_affected(&self, step: &str) -> Option<u64> {
        if let Some(table) = step.strip_prefix(SCD_STEP_PREFIX) {
            return self.scd_updates.get(table).copied();
        }
        self.dimensions_built
            .get(step)
            .or_else(|| self.fact_tables_built.get(step))
            .or_else(|| self.aggregates_built.get(step))
            .copied()
    }

    pub fn is_skipped(&self, step: &str) -> bool {
        self.skipped_steps.iter().any(|s| s == step)
    }

    /// Sum over every step, retirements included
    pub fn total_rows(&self) -> u64 {
        self.dimensions_built
            .values()
            .chain(self.fact_tables_built.values())
            .chain(self.aggregates_built.values())
            .chain(self.scd_updates.values())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> BuildReport {
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 2, 30, 0).unwrap();
        let mut report = BuildReport::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), ts);
        report.record_scd(
            &ScdDimension::CUSTOMERS,
            ScdOutcome {
                inserted: 4,
                retired: 1,
            },
        );
        report.record_scd(&ScdDimension::PRODUCTS, ScdOutcome::default());
        report.record_skipped(STEP_DIM_DATE);
        report.record_dimension(STEP_DIM_PAYMENT_METHOD, 2);
        report.record_facts(FactLoadOutcome {
            inserted: 7,
            deferred: 3,
        });
        report.record_aggregates(AggregateOutcome {
            daily: 2,
            product: 3,
            customer_lifetime: 4,
        });
        report
    }

    #[test]
    fn test_rows_affected_by_step() {
        let report = sample();
        assert_eq!(report.rows_affected("dim_customers"), Some(4));
        assert_eq!(report.rows_affected("scd_dim_customers"), Some(1));
        assert_eq!(report.rows_affected("scd_dim_products"), Some(0));
        assert_eq!(report.rows_affected(STEP_FACT_SALES), Some(7));
        assert_eq!(report.rows_affected(STEP_AGG_CUSTOMER_LIFETIME), Some(4));
        assert_eq!(report.rows_affected(STEP_DIM_DATE), Some(0));
        assert_eq!(report.rows_affected("dim_unknown"), None);
        assert!(report.is_skipped(STEP_DIM_DATE));
        assert_eq!(report.total_rows(), 4 + 1 + 2 + 7 + 2 + 3 + 4);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["warehouse_build_timestamp"], "2024-06-01T02:30:00Z");
        assert_eq!(json["as_of"], "2024-06-01");
        assert_eq!(json["dimensions_built"]["dim_payment_method"], 2);
        assert_eq!(json["fact_tables_built"]["fact_sales"], 7);
        assert_eq!(json["aggregates_built"]["agg_daily_sales"], 2);
        assert_eq!(json["scd_updates"]["dim_customers"], 1);
        assert_eq!(json["skipped_steps"], serde_json::json!(["dim_date"]));
    }

    #[test]
    fn test_deserialize_without_skipped_steps() {
        let json = r#"{
            "warehouse_build_timestamp": "2024-06-01T02:30:00Z",
            "as_of": "2024-06-01",
            "dimensions_built": {"dim_date": 3},
            "fact_tables_built": {},
            "aggregates_built": {},
            "scd_updates": {}
        }"#;
        let report: BuildReport = serde_json::from_str(json).unwrap();
        assert!(report.skipped_steps.is_empty());
        assert_eq!(report.rows_affected("dim_date"), Some(3));
    }
}
