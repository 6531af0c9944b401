//! Sales fact row

use serde::{Deserialize, Serialize};

/// One loaded transaction line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSaleRow {
    pub sale_sk: i64,
    pub transaction_id: String,
    pub item_id: String,
    pub customer_sk: i64,
    pub product_sk: i64,
    pub date_sk: i64,
    pub payment_method_sk: Option<i64>,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount_percentage: f64,
    pub line_total: f64,
    pub transaction_total: f64,
    pub shipping_address: Option<String>,
}
