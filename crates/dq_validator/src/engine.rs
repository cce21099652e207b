//! Main validation engine.
//!
//! The engine checks the schema contract, then evaluates every rule of a rule
//! set against the same borrowed dataset, one scoped thread per rule. The
//! report is assembled only after every thread has been joined.

use crate::{DataSet, DatasetProvider, ProviderError, RuleContext, RuleSet, SchemaValidator};
use chrono::NaiveDate;
use dq_core::{
    RowKey, RuleExecutionError, RuleResult, SchemaContract, SchemaError, ValidationReport,
};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs rule sets against datasets.
///
/// The engine holds no mutable state: runs are reentrant, and two runs over
/// the same inputs produce identical reports.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use dq_core::FixtureRow;
/// use dq_validator::{DataSet, RuleSet, ValidationEngine};
///
/// let dataset = DataSet::from_fixture(&[FixtureRow::sample()]);
/// let today = NaiveDate::from_ymd_opt(2025, 7, 16).unwrap();
///
/// let report = ValidationEngine::new().run(&dataset, &RuleSet::default_rules(), today);
/// assert!(report.passed());
/// assert_eq!(report.rows_examined, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    schema_validator: SchemaValidator,
}

impl ValidationEngine {
    /// Creates an engine enforcing the silver daily schema contract.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine enforcing another schema contract.
    pub fn with_contract(contract: SchemaContract) -> Self {
        Self {
            schema_validator: SchemaValidator::new(contract),
        }
    }

    pub fn contract(&self) -> &SchemaContract {
        self.schema_validator.contract()
    }

    /// Checks the dataset against the schema contract without running rules.
    pub fn validate_schema(&self, dataset: &DataSet) -> Result<(), SchemaError> {
        self.schema_validator.validate(dataset)
    }

    /// Validates a dataset.
    ///
    /// A schema failure aborts the run before any rule executes. Otherwise a
    /// rule that faults or panics is recorded under its own name while the
    /// other rules still complete.
    ///
    /// A panicking rule still goes through the process panic hook, so with the
    /// default hook its message appears on stderr while the run carries on.
    /// The panic is recorded as [`RuleExecutionError::Panicked`].
    pub fn run(
        &self,
        dataset: &DataSet,
        rule_set: &RuleSet,
        current_date: NaiveDate,
    ) -> ValidationReport {
        let start = Instant::now();
        info!(
            rows = dataset.len(),
            rules = rule_set.len(),
            %current_date,
            "Starting validation run"
        );

        if let Err(error) = self.validate_schema(dataset) {
            warn!(%error, "Schema contract violated, no rule executed");
            return ValidationReport::schema_failure(error);
        }

        let context = RuleContext::new(current_date);
        let outcomes = evaluate_concurrently(dataset, rule_set, &context);

        let mut rule_results = BTreeMap::new();
        let mut faults = Vec::new();
        for (name, reason, outcome) in outcomes {
            match outcome {
                Ok(violations) => {
                    debug!(rule = %name, violations = violations.len(), "Rule completed");
                    rule_results.insert(name, RuleResult::new(reason, violations));
                }
                Err(error) => {
                    let error = error.attributed_to(name.as_str());
                    warn!(rule = %name, %error, "Rule execution failed");
                    faults.push((name, error));
                }
            }
        }

        let report = ValidationReport::from_rule_outcomes(rule_results, faults, dataset.len());
        info!(
            overall = ?report.overall,
            violations = report.violation_count(),
            errors = report.errors.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Validation run finished"
        );
        report
    }

    /// Loads a dataset from `provider` and validates it.
    ///
    /// Loading finishes before the engine starts; a provider failure is
    /// returned as is and no report is produced.
    pub async fn run_provider<P: DatasetProvider>(
        &self,
        provider: &P,
        rule_set: &RuleSet,
        current_date: NaiveDate,
    ) -> Result<ValidationReport, ProviderError> {
        debug!(source = %provider.describe(), "Loading dataset");
        let dataset = provider.load().await?;
        Ok(self.run(&dataset, rule_set, current_date))
    }
}

/// Name, reason and result of one rule evaluation.
type RuleOutcome = (String, String, Result<BTreeSet<RowKey>, RuleExecutionError>);

/// Evaluates every rule on its own scoped thread and joins them all.
fn evaluate_concurrently(
    dataset: &DataSet,
    rule_set: &RuleSet,
    context: &RuleContext,
) -> Vec<RuleOutcome> {
    thread::scope(|scope| {
        let handles: Vec<_> = rule_set
            .iter()
            .map(|rule| {
                let handle = scope.spawn(move || rule.evaluate(dataset, context));
                (rule, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(rule, handle)| {
                let outcome = handle.join().unwrap_or_else(|payload| {
                    Err(RuleExecutionError::panicked(
                        rule.name(),
                        panic_message(payload.as_ref()),
                    ))
                });
                (rule.name().to_string(), rule.reason(), outcome)
            })
            .collect()
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_core::{ColumnType, FixtureRow, SchemaContractBuilder, Verdict, columns};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 16).unwrap()
    }

    #[test]
    fn test_empty_rule_set_passes() {
        let dataset = DataSet::from_fixture(&[FixtureRow::sample()]);
        let report = ValidationEngine::new().run(&dataset, &RuleSet::new(), today());

        assert_eq!(report.overall, Verdict::Pass);
        assert!(report.rule_results.is_empty());
        assert_eq!(report.rows_examined, 1);
    }

    #[test]
    fn test_empty_dataset_passes() {
        let dataset = DataSet::from_fixture(&[]);
        let report = ValidationEngine::new().run(&dataset, &RuleSet::default_rules(), today());

        assert!(report.passed());
        assert_eq!(report.rows_examined, 0);
        assert_eq!(report.rule_results.len(), 2);
    }

    #[test]
    fn test_custom_contract() {
        let contract = SchemaContractBuilder::from(SchemaContract::silver_daily())
            .column("station", ColumnType::String)
            .build();
        let engine = ValidationEngine::with_contract(contract);

        let err = engine
            .validate_schema(&DataSet::from_fixture(&[FixtureRow::sample()]))
            .unwrap_err();
        assert_eq!(err.columns(), vec!["station"]);
        assert!(engine.contract().column(columns::DQ_PASSED).is_some());
    }

    #[test]
    fn test_panic_message_payloads() {
        let text: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);

        assert_eq!(panic_message(text.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "bang");
        assert_eq!(panic_message(other.as_ref()), "unknown panic payload");
    }
}
