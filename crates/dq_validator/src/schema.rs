//! Schema contract validation.
//!
//! Checks that a dataset exposes every contract column with a compatible
//! type, both in its declared columns and in every row. Runs once per
//! validation, before any rule.

use crate::{DataSet, DataValue};
use dq_core::{ColumnIssue, ColumnSpec, ColumnType, SchemaContract, SchemaError};

/// Row-level issues recorded per column before the rest are elided.
const MAX_ROW_ISSUES_PER_COLUMN: usize = 16;

/// Validates datasets against a schema contract.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    contract: SchemaContract,
}

impl SchemaValidator {
    /// Creates a validator for the given contract.
    pub fn new(contract: SchemaContract) -> Self {
        Self { contract }
    }

    /// Returns the contract this validator checks.
    pub fn contract(&self) -> &SchemaContract {
        &self.contract
    }

    /// Validates a dataset against the contract.
    ///
    /// Returns every issue found. A column that is missing from the dataset
    /// or declared with an incompatible type is reported once and its rows
    /// are not inspected further.
    pub fn validate(&self, dataset: &DataSet) -> Result<(), SchemaError> {
        let mut issues = Vec::new();

        for spec in &self.contract.columns {
            match dataset.column(&spec.name) {
                None => issues.push(ColumnIssue::missing(&spec.name)),
                Some(declared)
                    if declared.column_type != ColumnType::Null
                        && !spec.column_type.accepts(declared.column_type) =>
                {
                    issues.push(ColumnIssue::type_mismatch(
                        &spec.name,
                        spec.column_type,
                        declared.column_type,
                        None,
                    ));
                }
                Some(_) => issues.extend(self.validate_column_values(spec, dataset)),
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::new(issues))
        }
    }

    /// Checks every row's value of one column.
    fn validate_column_values(&self, spec: &ColumnSpec, dataset: &DataSet) -> Vec<ColumnIssue> {
        let mut issues = Vec::new();

        for (row_idx, row) in dataset.rows().enumerate() {
            if issues.len() >= MAX_ROW_ISSUES_PER_COLUMN {
                break;
            }

            let issue = match row.get(&spec.name) {
                None => Some(ColumnIssue::missing_in_row(&spec.name, row_idx)),
                Some(DataValue::Null) => Some(ColumnIssue::null(&spec.name, row_idx)),
                Some(value) if !spec.column_type.accepts(value.column_type()) => {
                    Some(ColumnIssue::type_mismatch(
                        &spec.name,
                        spec.column_type,
                        value.column_type(),
                        Some(row_idx),
                    ))
                }
                Some(DataValue::Int(count)) if spec.non_negative && *count < 0 => {
                    Some(ColumnIssue::Negative {
                        column: spec.name.clone(),
                        row: row_idx,
                        value: *count,
                    })
                }
                Some(_) => None,
            };

            issues.extend(issue);
        }

        issues
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(SchemaContract::silver_daily())
    }
}
