//! Completeness of closed days.
//!
//! A day is closed once the processing date has moved past it. A closed day's
//! row must aggregate exactly the expected number of hourly observations:
//! fewer means missing data, more means duplicate ingestion. Rows dated on or
//! after the processing date are still accumulating and are never flagged.

use crate::{DataSet, RowView, Rule, RuleContext};
use dq_core::{HOURS_PER_DAY, RowKey, RuleExecutionError, columns};
use std::collections::BTreeSet;
use tracing::trace;

/// Flags closed days whose `row_count` differs from the expected count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletenessRule {
    expected_row_count: i64,
}

impl CompletenessRule {
    pub const NAME: &'static str = "completeness";

    /// Creates the rule expecting 24 hourly rows per closed day.
    pub fn new() -> Self {
        Self {
            expected_row_count: HOURS_PER_DAY,
        }
    }

    /// Creates the rule with a different expected count.
    pub fn with_expected_row_count(expected_row_count: i64) -> Self {
        Self { expected_row_count }
    }

    pub fn expected_row_count(&self) -> i64 {
        self.expected_row_count
    }
}

impl Default for CompletenessRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for CompletenessRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reason(&self) -> String {
        format!(
            "closed day does not aggregate exactly {} hourly observations",
            self.expected_row_count
        )
    }

    fn evaluate(
        &self,
        dataset: &DataSet,
        context: &RuleContext,
    ) -> Result<BTreeSet<RowKey>, RuleExecutionError> {
        let mut violations = BTreeSet::new();

        for row in RowView::iter(self.name(), dataset) {
            if row.date(columns::DATE)? >= context.current_date {
                continue;
            }

            let row_count = row.int(columns::ROW_COUNT)?;
            if row_count != self.expected_row_count {
                let key = row.key()?;
                trace!(%key, row_count, "incomplete closed day");
                violations.insert(key);
            }
        }

        Ok(violations)
    }
}
