//! Shared row types for the warehouse tables
//!
//! Repositories map query results into these; the domain layer builds them
//! before writing.

pub mod aggregate;
pub mod dimension;
pub mod fact;
pub mod reference;

pub use aggregate::{CustomerLifetimeRow, DailySalesRow, ProductSalesRow};
pub use dimension::{DimensionVersion, ScdDimension};
pub use fact::FactSaleRow;
pub use reference::{DateDimensionRow, PaymentCategory, PaymentMethodRow};
