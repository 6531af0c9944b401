//! SQLite repositories
//!
//! One module per warehouse table group. Every function takes the
//! connection it runs on, so a build threads its transaction through them.
//! Row types are imported from `crate::data::types`.

pub mod aggregates;
pub mod date;
pub mod dimension;
pub mod fact_sales;
pub mod payment_method;
pub mod production;

pub use aggregates::{
    count_aggregates, get_customer_lifetime, get_daily_sales, get_product_sales,
    insert_customer_lifetime, insert_daily_sales, insert_product_sales,
};
pub use date::{count_dates, get_date, insert_date};
pub use dimension::{
    business_keys_with_multiple_current, count_versions, current_surrogate_key,
    insert_new_versions, list_versions, retire_inactive_versions,
};
pub use fact_sales::{count_facts, count_unloaded_items, get_fact_by_item, insert_new_facts};
pub use payment_method::{get_payment_method, insert_payment_method, payment_method_exists};
pub use production::{distinct_payment_methods, transaction_date_range};
