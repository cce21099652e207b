//! # Silver DQ Core
//!
//! Core data structures and types for the Silver data quality engine.
//!
//! This crate provides the building blocks shared by the parser, the validation
//! engine and the dataset providers. The engine validates the "silver" daily
//! weather table: one already-aggregated row per `(date, location_lat, location_lon)`.
//!
//! ## Key Concepts
//!
//! - **Schema Contract**: the fixed column set and types required of any input dataset
//! - **Row Key**: the `(date, location_lat, location_lon)` tuple identifying a row
//! - **Validation Report**: overall verdict, per-rule violations and error attribution
//! - **Validation Config**: source, current date and rule set, loaded from YAML/TOML
//!
//! ## Example
//!
//! ```rust
//! use dq_core::{ColumnType, SchemaContract, columns};
//!
//! let contract = SchemaContract::silver_daily();
//! let row_count = contract.column(columns::ROW_COUNT).unwrap();
//! assert_eq!(row_count.column_type, ColumnType::Int64);
//! ```

pub mod builder;
pub mod config;
pub mod contract;
pub mod error;
pub mod key;
pub mod report;

pub use builder::*;
pub use config::*;
pub use contract::*;
pub use error::*;
pub use key::*;
pub use report::*;
