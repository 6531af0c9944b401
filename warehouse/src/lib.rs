//! SalesDW: builds a star-schema sales warehouse from cleansed production
//! tables in a single SQLite transaction.

pub mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
