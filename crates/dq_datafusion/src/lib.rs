//! DataFusion integration for the Silver data quality engine.
//!
//! This crate provides the live dataset provider: a table registered in a
//! DataFusion [`SessionContext`](datafusion::prelude::SessionContext) is read
//! into record batches, and the batches are converted into a dataset the
//! validation engine can check.
//!
//! # Example
//!
//! ```no_run
//! use dq_core::{LiveSourceConfig, TableFormat};
//! use dq_datafusion::{LiveSource, session_for};
//! use dq_validator::{DatasetProvider, RuleSet, ValidationEngine};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LiveSourceConfig {
//!     table: "weather_silver.daily".to_string(),
//!     path: "data/daily.csv".to_string(),
//!     format: TableFormat::Csv,
//! };
//!
//! let ctx = session_for(&config).await?;
//! let source = LiveSource::new(ctx, &config.table);
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2025, 7, 16).unwrap();
//! let report = ValidationEngine::new()
//!     .run_provider(&source, &RuleSet::default_rules(), today)
//!     .await?;
//! println!("{}", report.to_json()?);
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

mod converter;
mod source;

pub use converter::{array_to_values, arrow_type_to_column_type, batches_to_dataset, schema_to_columns};
pub use source::{LiveSource, register_table, session_for};

/// Errors raised while preparing a DataFusion session.
#[derive(Error, Debug)]
pub enum LiveSourceError {
    /// The table names a catalog the session does not know
    #[error("Unknown catalog: {0}")]
    UnknownCatalog(String),

    /// Registering the table or its schema failed
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),
}
