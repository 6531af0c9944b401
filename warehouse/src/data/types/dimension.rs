//! SCD Type 2 dimension descriptors and version rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Static description of a Type 2 dimension and the production table feeding it.
///
/// Identifiers here are compile-time constants; they are interpolated into SQL
/// text while all values are bound as parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScdDimension {
    /// Warehouse table name, also the report step name
    pub table: &'static str,
    /// Production source table
    pub source: &'static str,
    /// Business key column, same name in both tables
    pub business_key: &'static str,
    /// Surrogate key column in the dimension table
    pub surrogate_key: &'static str,
    /// Descriptive attributes copied from the source
    pub attributes: &'static [&'static str],
}

impl ScdDimension {
    pub const CUSTOMERS: ScdDimension = ScdDimension {
        table: "dim_customers",
        source: "production_customers",
        business_key: "customer_id",
        surrogate_key: "customer_sk",
        attributes: &[
            "first_name",
            "last_name",
            "email",
            "phone",
            "city",
            "state",
            "country",
            "age_group",
            "registration_date",
        ],
    };

    pub const PRODUCTS: ScdDimension = ScdDimension {
        table: "dim_products",
        source: "production_products",
        business_key: "product_id",
        surrogate_key: "product_sk",
        attributes: &[
            "product_name",
            "category",
            "sub_category",
            "price",
            "cost",
            "brand",
        ],
    };

    /// Comma-separated business key followed by the attribute columns
    pub fn column_list(&self) -> String {
        std::iter::once(self.business_key)
            .chain(self.attributes.iter().copied())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Versioning view of a dimension row (attributes omitted)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionVersion {
    pub surrogate_key: i64,
    pub business_key: String,
    pub is_current: bool,
    pub effective_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_list_starts_with_business_key() {
        let cols = ScdDimension::PRODUCTS.column_list();
        assert_eq!(
            cols,
            "product_id, product_name, category, sub_category, price, cost, brand"
        );
    }

    #[test]
    fn test_customer_dimension_carries_all_attributes() {
        let dim = ScdDimension::CUSTOMERS;
        assert_eq!(dim.attributes.len(), 9);
        assert!(dim.attributes.contains(&"registration_date"));
        assert_eq!(dim.surrogate_key, "customer_sk");
    }
}
