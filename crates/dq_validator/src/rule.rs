//! The rule abstraction.
//!
//! A rule is a named, pure function from a dataset to the set of keys of the
//! rows that violate it. Rules keep no state between invocations and may be
//! evaluated concurrently on the same dataset.

use crate::{DataRow, DataSet, DataValue};
use chrono::NaiveDate;
use dq_core::{RowKey, RuleExecutionError, columns};
use std::collections::BTreeSet;

/// Inputs a rule may depend on besides the dataset.
///
/// The current date is injected here so that no rule reads the system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    /// Processing date; rows dated strictly before it are closed days
    pub current_date: NaiveDate,
}

impl RuleContext {
    pub fn new(current_date: NaiveDate) -> Self {
        Self { current_date }
    }
}

/// A data quality rule.
///
/// # Example
///
/// ```rust
/// use dq_validator::{DataSet, Rule, RuleContext, RowView};
/// use dq_core::{RowKey, RuleExecutionError};
/// use std::collections::BTreeSet;
///
/// struct FreezingDays;
///
/// impl Rule for FreezingDays {
///     fn name(&self) -> &str {
///         "freezing_days"
///     }
///
///     fn reason(&self) -> String {
///         "average temperature below 0 °C".to_string()
///     }
///
///     fn evaluate(
///         &self,
///         dataset: &DataSet,
///         _context: &RuleContext,
///     ) -> Result<BTreeSet<RowKey>, RuleExecutionError> {
///         let mut violations = BTreeSet::new();
///         for row in RowView::iter(self.name(), dataset) {
///             if row.float("avg_temp_c")? < 0.0 {
///                 violations.insert(row.key()?);
///             }
///         }
///         Ok(violations)
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Unique name of the rule within a rule set.
    fn name(&self) -> &str;

    /// Human-readable reason shared by every violation of this rule.
    fn reason(&self) -> String;

    /// Evaluates the rule, returning the keys of violating rows.
    fn evaluate(
        &self,
        dataset: &DataSet,
        context: &RuleContext,
    ) -> Result<BTreeSet<RowKey>, RuleExecutionError>;
}

/// Typed read access to one row on behalf of a rule.
///
/// Accessors fail with [`RuleExecutionError::ColumnAccess`] attributed to the
/// rule when a column is absent or holds a value of another type.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    rule: &'a str,
    index: usize,
    row: &'a DataRow,
}

impl<'a> RowView<'a> {
    pub fn new(rule: &'a str, index: usize, row: &'a DataRow) -> Self {
        Self { rule, index, row }
    }

    /// Iterates over every row of `dataset` on behalf of `rule`.
    pub fn iter(rule: &'a str, dataset: &'a DataSet) -> impl Iterator<Item = RowView<'a>> + 'a {
        dataset
            .rows()
            .enumerate()
            .map(move |(index, row)| RowView::new(rule, index, row))
    }

    /// The key of this row.
    pub fn key(&self) -> Result<RowKey, RuleExecutionError> {
        Ok(RowKey::new(
            self.date(columns::DATE)?,
            self.float(columns::LOCATION_LAT)?,
            self.float(columns::LOCATION_LON)?,
        ))
    }

    pub fn int(&self, column: &str) -> Result<i64, RuleExecutionError> {
        self.read(column, "int64", DataValue::as_int)
    }

    pub fn float(&self, column: &str) -> Result<f64, RuleExecutionError> {
        self.read(column, "float64", DataValue::as_float)
    }

    pub fn bool(&self, column: &str) -> Result<bool, RuleExecutionError> {
        self.read(column, "boolean", DataValue::as_bool)
    }

    pub fn date(&self, column: &str) -> Result<NaiveDate, RuleExecutionError> {
        self.read(column, "date", DataValue::as_date)
    }

    fn read<T>(
        &self,
        column: &str,
        expected: &str,
        extract: impl Fn(&DataValue) -> Option<T>,
    ) -> Result<T, RuleExecutionError> {
        let value = self.row.get(column).ok_or_else(|| {
            RuleExecutionError::column_access(self.rule, column, self.index, "column not present")
        })?;

        extract(value).ok_or_else(|| {
            RuleExecutionError::column_access(
                self.rule,
                column,
                self.index,
                format!("expected {}, found {}", expected, value.type_name()),
            )
        })
    }
}
