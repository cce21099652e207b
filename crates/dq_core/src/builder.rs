//! Builder pattern for schema contracts.

use crate::{ColumnSpec, ColumnType, SchemaContract};

/// Builder for creating a `SchemaContract`.
///
/// # Example
///
/// ```rust
/// use dq_core::{ColumnType, SchemaContractBuilder};
///
/// let contract = SchemaContractBuilder::new("stations")
///     .column("station_id", ColumnType::String)
///     .column("elevation_m", ColumnType::Float64)
///     .build();
///
/// assert_eq!(contract.columns.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SchemaContractBuilder {
    name: String,
    columns: Vec<ColumnSpec>,
}

impl SchemaContractBuilder {
    /// Creates a new builder for a contract with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Adds a required column.
    ///
    /// Declaring the same column twice replaces the earlier type.
    pub fn column(self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.column_spec(ColumnSpec::new(name, column_type))
    }

    /// Adds a fully specified column.
    pub fn column_spec(mut self, spec: ColumnSpec) -> Self {
        match self.columns.iter_mut().find(|c| c.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.columns.push(spec),
        }
        self
    }

    /// Removes a column. Mostly useful in tests deriving a contract variant.
    pub fn without(mut self, name: &str) -> Self {
        self.columns.retain(|c| c.name != name);
        self
    }

    /// Builds the contract.
    pub fn build(self) -> SchemaContract {
        SchemaContract {
            name: self.name,
            columns: self.columns,
        }
    }
}

impl From<SchemaContract> for SchemaContractBuilder {
    fn from(contract: SchemaContract) -> Self {
        Self {
            name: contract.name,
            columns: contract.columns,
        }
    }
}
