//! Dimensional warehouse build
//!
//! Components, in the order the builder runs them:
//! - `scd` - Type 2 customer and product dimensions
//! - `date_dimension` - calendar rows for the observed transaction range
//! - `payment_method` - normalized payment method reference rows
//! - `fact_loader` - append-only sales facts keyed to current dimension rows
//! - `aggregates` - insert-once daily, product and customer rollups
//!
//! `builder` sequences them on one transaction and produces a `BuildReport`.

pub mod aggregates;
pub mod builder;
pub mod date_dimension;
pub mod error;
pub mod fact_loader;
pub mod payment_method;
pub mod report;
pub mod scd;

pub use aggregates::{AggregateOutcome, build_aggregates};
pub use builder::{BuildOptions, WarehouseBuilder};
pub use date_dimension::{build_date_dimension, calendar_day, calendar_days, date_range};
pub use error::WarehouseError;
pub use fact_loader::{FactLoadOutcome, load_fact_sales};
pub use payment_method::{build_payment_method_dimension, normalize_payment_method};
pub use report::BuildReport;
pub use scd::{ScdOutcome, build_scd_dimension};
