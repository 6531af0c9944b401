//! Aggregate rollup rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily sales rollup keyed by date surrogate key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySalesRow {
    pub date_sk: i64,
    pub total_sales: f64,
    pub total_units_sold: i64,
    pub transaction_count: i64,
    pub customer_count: i64,
    pub avg_transaction_value: f64,
}

/// Product performance rollup keyed by product surrogate key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSalesRow {
    pub product_sk: i64,
    pub total_sales: f64,
    pub total_units_sold: i64,
    pub transaction_count: i64,
    pub avg_discount: f64,
}

/// Customer lifetime value rollup keyed by customer surrogate key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLifetimeRow {
    pub customer_sk: i64,
    pub total_spent: f64,
    pub total_units_purchased: i64,
    pub transaction_count: i64,
    pub first_purchase_date: NaiveDate,
    pub last_purchase_date: NaiveDate,
    pub avg_transaction_value: f64,
}
