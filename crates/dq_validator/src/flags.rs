//! Upstream data-quality flag gate.
//!
//! `dq_passed` is set by earlier pipeline stages. This rule does not re-derive
//! why a row failed upstream, only that it did.

use crate::{DataSet, RowView, Rule, RuleContext};
use dq_core::{RowKey, RuleExecutionError, columns};
use std::collections::BTreeSet;

/// Flags every row whose `dq_passed` is false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagConsistencyRule;

impl FlagConsistencyRule {
    pub const NAME: &'static str = "flag_consistency";

    pub fn new() -> Self {
        Self
    }
}

impl Rule for FlagConsistencyRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn reason(&self) -> String {
        "row failed an upstream data-quality check (dq_passed = false)".to_string()
    }

    fn evaluate(
        &self,
        dataset: &DataSet,
        _context: &RuleContext,
    ) -> Result<BTreeSet<RowKey>, RuleExecutionError> {
        let mut violations = BTreeSet::new();

        for row in RowView::iter(self.name(), dataset) {
            if !row.bool(columns::DQ_PASSED)? {
                violations.insert(row.key()?);
            }
        }

        Ok(violations)
    }
}
