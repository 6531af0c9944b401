//! Non-versioned reference dimensions (calendar and payment method)

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Date dimension
// ============================================================================

/// One calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateDimensionRow {
    /// `YYYYMMDD` as an integer
    pub date_sk: i64,
    pub date_id: NaiveDate,
    pub day_of_month: u32,
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: u32,
    pub day_name: String,
    pub month: u32,
    pub month_name: String,
    pub quarter: u32,
    pub year: i32,
    /// ISO 8601 week number
    pub week_of_year: u32,
    pub is_weekend: bool,
}

// ============================================================================
// Payment method dimension
// ============================================================================

/// Payment method category buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentCategory {
    Card,
    Digital,
    Cash,
    #[default]
    Other,
}

impl PaymentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "Card",
            Self::Digital => "Digital",
            Self::Cash => "Cash",
            Self::Other => "Other",
        }
    }

    /// Classify a raw source label. Matching is exact on the raw label.
    pub fn classify(label: &str) -> Self {
        match label {
            "Credit Card" | "Debit Card" => Self::Card,
            "UPI" | "Net Banking" => Self::Digital,
            "Cash on Delivery" => Self::Cash,
            _ => Self::Other,
        }
    }

    /// Parse the stored column value; unknown values fall back to `Other`
    pub fn from_stored(s: &str) -> Self {
        match s {
            "Card" => Self::Card,
            "Digital" => Self::Digital,
            "Cash" => Self::Cash,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method dimension row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodRow {
    /// Surrogate key, `None` until written
    pub payment_method_sk: Option<i64>,
    /// Normalized business key, e.g. `net_banking`
    pub payment_method_id: String,
    /// Raw label as first seen in the source
    pub payment_method_name: String,
    pub category: PaymentCategory,
    pub is_active: bool,
}
