//! Live table source backed by a DataFusion session.

use crate::LiveSourceError;
use crate::converter::batches_to_dataset;
use datafusion::catalog::{CatalogProvider, MemorySchemaProvider};
use datafusion::common::TableReference;
use datafusion::prelude::{CsvReadOptions, NdJsonReadOptions, ParquetReadOptions, SessionContext};
use dq_core::{LiveSourceConfig, TableFormat};
use dq_validator::{DataSet, DatasetProvider, ProviderError};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// Reads a table registered in an injected [`SessionContext`].
///
/// The session is owned by the caller: registering tables, object stores or
/// catalogs happens before the source is created.
#[derive(Clone)]
pub struct LiveSource {
    ctx: SessionContext,
    table: String,
}

impl LiveSource {
    pub fn new(ctx: SessionContext, table: impl Into<String>) -> Self {
        Self {
            ctx,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    async fn read(&self) -> Result<DataSet, ProviderError> {
        let table = TableReference::parse_str(&self.table);

        let frame = self
            .ctx
            .table(table)
            .await
            .map_err(|e| ProviderError::unavailable(&self.table, e.to_string()))?;
        let schema = frame.schema().as_arrow().clone();

        let batches = frame
            .collect()
            .await
            .map_err(|e| ProviderError::read(&self.table, e.to_string()))?;

        let dataset = batches_to_dataset(&schema, &batches)?;
        info!(
            table = %self.table,
            rows = dataset.len(),
            batches = batches.len(),
            "Loaded live table"
        );
        Ok(dataset)
    }
}

impl std::fmt::Debug for LiveSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSource")
            .field("session_id", &self.ctx.session_id())
            .field("table", &self.table)
            .finish()
    }
}

impl DatasetProvider for LiveSource {
    fn describe(&self) -> String {
        format!("live table '{}'", self.table)
    }

    fn load(&self) -> impl Future<Output = Result<DataSet, ProviderError>> + Send {
        self.read()
    }
}

/// Registers the table file described by `config` in `ctx`.
///
/// A schema-qualified name such as `weather_silver.daily` gets its schema
/// created in the catalog when it does not exist yet.
pub async fn register_table(
    ctx: &SessionContext,
    config: &LiveSourceConfig,
) -> Result<(), LiveSourceError> {
    let table = TableReference::parse_str(&config.table);
    ensure_schema(ctx, &table)?;

    match config.format {
        TableFormat::Csv => {
            ctx.register_csv(table, &config.path, CsvReadOptions::new())
                .await?
        }
        TableFormat::Parquet => {
            ctx.register_parquet(table, &config.path, ParquetReadOptions::default())
                .await?
        }
        TableFormat::Json => {
            ctx.register_json(table, &config.path, NdJsonReadOptions::default())
                .await?
        }
    }

    info!(
        table = %config.table,
        path = %config.path,
        format = ?config.format,
        "Registered live table"
    );
    Ok(())
}

fn ensure_schema(ctx: &SessionContext, table: &TableReference) -> Result<(), LiveSourceError> {
    let Some(schema_name) = table.schema() else {
        return Ok(());
    };

    let catalog_name = match table.catalog() {
        Some(name) => name.to_string(),
        None => ctx.state().config_options().catalog.default_catalog.clone(),
    };
    let catalog = ctx
        .catalog(&catalog_name)
        .ok_or_else(|| LiveSourceError::UnknownCatalog(catalog_name.clone()))?;

    if catalog.schema(schema_name).is_none() {
        catalog.register_schema(schema_name, Arc::new(MemorySchemaProvider::new()))?;
        debug!(catalog = %catalog_name, schema = schema_name, "Created schema");
    }
    Ok(())
}

/// Builds a fresh session with the configured table registered.
pub async fn session_for(config: &LiveSourceConfig) -> Result<SessionContext, LiveSourceError> {
    let ctx = SessionContext::new();
    register_table(&ctx, config).await?;
    Ok(ctx)
}
