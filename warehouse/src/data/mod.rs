//! Data storage layer
//!
//! - `sqlite` - Embedded warehouse store: schema, migrations, repositories
//! - `types` - Row types shared by repositories and the build domain

pub mod sqlite;
pub mod types;

pub use sqlite::{SqliteError, SqliteService};
