//! Domain logic
//!
//! - `warehouse` - Dimensional warehouse build (dimensions, facts, rollups)

pub mod warehouse;

pub use warehouse::{BuildOptions, BuildReport, WarehouseBuilder, WarehouseError};
