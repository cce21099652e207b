//! Additional quality rules.
//!
//! - Key uniqueness: detection of rows sharing a `(date, lat, lon)` key
//! - Range: inclusive bounds on an aggregated float column

use crate::{DataSet, RowView, Rule, RuleContext};
use dq_core::{RangeConfig, RowKey, RuleExecutionError};
use std::collections::{BTreeSet, HashSet};

/// Flags keys that occur on more than one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyUniquenessRule;

impl KeyUniquenessRule {
    pub const NAME: &'static str = "key_uniqueness";

    pub fn new() -> Self {
        Self
    }
}

impl Rule for KeyUniquenessRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reason(&self) -> String {
        "more than one row shares this (date, location_lat, location_lon) key".to_string()
    }

    fn evaluate(
        &self,
        dataset: &DataSet,
        _context: &RuleContext,
    ) -> Result<BTreeSet<RowKey>, RuleExecutionError> {
        let mut seen = HashSet::with_capacity(dataset.len());
        let mut duplicates = BTreeSet::new();

        for row in RowView::iter(self.name(), dataset) {
            let key = row.key()?;
            if !seen.insert(key) {
                duplicates.insert(key);
            }
        }

        Ok(duplicates)
    }
}

/// Flags rows whose value in a float column falls outside `[min, max]`.
///
/// NaN is always out of range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRule {
    name: String,
    column: String,
    min: f64,
    max: f64,
}

impl RangeRule {
    /// Prefix of every range rule name; the column name follows it.
    pub const PREFIX: &'static str = "range:";

    pub fn new(column: impl Into<String>, min: f64, max: f64) -> Self {
        let column = column.into();
        Self {
            name: format!("{}{}", Self::PREFIX, column),
            column,
            min,
            max,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<&RangeConfig> for RangeRule {
    fn from(config: &RangeConfig) -> Self {
        Self::new(&config.column, config.min, config.max)
    }
}

impl Rule for RangeRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn reason(&self) -> String {
        format!(
            "{} outside [{}, {}]",
            self.column, self.min, self.max
        )
    }

    fn evaluate(
        &self,
        dataset: &DataSet,
        _context: &RuleContext,
    ) -> Result<BTreeSet<RowKey>, RuleExecutionError> {
        let mut violations = BTreeSet::new();

        for row in RowView::iter(self.name(), dataset) {
            if !self.contains(row.float(&self.column)?) {
                violations.insert(row.key()?);
            }
        }

        Ok(violations)
    }
}
