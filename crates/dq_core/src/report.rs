//! Validation report.
//!
//! A report is built once at the end of a validation run and never mutated
//! afterwards. It separates three things callers must triage differently:
//! rule violations (a data-quality failure), schema errors and rule faults
//! (infrastructure failures).

use crate::{RowKey, RuleExecutionError, SchemaError};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Reserved attribution name for schema contract failures.
pub const SCHEMA_ENTRY: &str = "schema";

/// Overall verdict of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

/// How a caller should treat a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every rule ran and found nothing
    Passed,
    /// Rules ran and found violations; the data is bad
    DataQualityFailure,
    /// The schema check failed or a rule faulted; the validation is broken
    InfrastructureFailure,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Passed => 0,
            Outcome::DataQualityFailure => 1,
            Outcome::InfrastructureFailure => 2,
        }
    }
}

/// Violations found by one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleResult {
    /// Human-readable reason shared by every violation of the rule
    pub reason: String,

    /// Keys of the violating rows
    pub violations: BTreeSet<RowKey>,
}

impl RuleResult {
    pub fn new(reason: impl Into<String>, violations: BTreeSet<RowKey>) -> Self {
        Self {
            reason: reason.into(),
            violations,
        }
    }

    /// Returns true if the rule found no violations.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// An error attributed to the schema check or to a single rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    Schema(SchemaError),
    RuleExecution(RuleExecutionError),
}

impl ReportError {
    /// Short machine-readable kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::Schema(_) => "schema_error",
            ReportError::RuleExecution(_) => "rule_execution_error",
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Schema(e) => write!(f, "{}", e),
            ReportError::RuleExecution(e) => write!(f, "{}", e),
        }
    }
}

impl Serialize for ReportError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReportError", 3)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        match self {
            ReportError::Schema(e) => state.serialize_field("detail", e)?,
            ReportError::RuleExecution(e) => state.serialize_field("detail", e)?,
        }
        state.end()
    }
}

/// Report of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Whether validation passed overall
    pub overall: Verdict,

    /// Violations per rule name, for every rule that completed
    pub rule_results: BTreeMap<String, RuleResult>,

    /// Errors per attribution name (`schema` or a rule name)
    pub errors: BTreeMap<String, ReportError>,

    /// Number of rows the rules examined
    pub rows_examined: usize,
}

impl ValidationReport {
    /// Creates the report of a run aborted by the schema check.
    ///
    /// No rule executed, so `rule_results` is empty and no rows were examined.
    pub fn schema_failure(error: SchemaError) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(SCHEMA_ENTRY.to_string(), ReportError::Schema(error));
        Self {
            overall: Verdict::Fail,
            rule_results: BTreeMap::new(),
            errors,
            rows_examined: 0,
        }
    }

    /// Assembles a report from completed rule results and rule faults.
    ///
    /// Each fault is filed under the name it is paired with, which is the name
    /// of the rule that was run. The verdict is `Fail` if any rule found
    /// violations or any rule faulted.
    pub fn from_rule_outcomes(
        rule_results: BTreeMap<String, RuleResult>,
        faults: Vec<(String, RuleExecutionError)>,
        rows_examined: usize,
    ) -> Self {
        let errors: BTreeMap<String, ReportError> = faults
            .into_iter()
            .map(|(name, e)| (name, ReportError::RuleExecution(e)))
            .collect();

        let clean = errors.is_empty() && rule_results.values().all(RuleResult::is_clean);

        Self {
            overall: if clean { Verdict::Pass } else { Verdict::Fail },
            rule_results,
            errors,
            rows_examined,
        }
    }

    /// Returns true if the verdict is `Pass`.
    pub fn passed(&self) -> bool {
        self.overall == Verdict::Pass
    }

    /// Classifies the report for triage.
    ///
    /// Any schema error or rule fault makes the outcome an infrastructure
    /// failure, even if other rules also found violations.
    pub fn outcome(&self) -> Outcome {
        if !self.errors.is_empty() {
            Outcome::InfrastructureFailure
        } else if self.passed() {
            Outcome::Passed
        } else {
            Outcome::DataQualityFailure
        }
    }

    /// Violations found by `rule`, if it completed.
    pub fn violations(&self, rule: &str) -> Option<&BTreeSet<RowKey>> {
        self.rule_results.get(rule).map(|r| &r.violations)
    }

    /// The schema error, if the run was aborted by the schema check.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self.errors.get(SCHEMA_ENTRY) {
            Some(ReportError::Schema(e)) => Some(e),
            _ => None,
        }
    }

    /// The fault recorded for `rule`, if it failed to execute.
    pub fn rule_error(&self, rule: &str) -> Option<&RuleExecutionError> {
        match self.errors.get(rule) {
            Some(ReportError::RuleExecution(e)) => Some(e),
            _ => None,
        }
    }

    /// Total number of violations across all rules.
    pub fn violation_count(&self) -> usize {
        self.rule_results.values().map(|r| r.violations.len()).sum()
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnIssue;
    use chrono::NaiveDate;

    fn key() -> RowKey {
        RowKey::new(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(), 52.52, 13.405)
    }

    #[test]
    fn test_clean_results_pass() {
        let mut results = BTreeMap::new();
        results.insert("completeness".to_string(), RuleResult::new("r", BTreeSet::new()));

        let report = ValidationReport::from_rule_outcomes(results, Vec::new(), 3);
        assert!(report.passed());
        assert_eq!(report.outcome(), Outcome::Passed);
        assert_eq!(report.rows_examined, 3);
    }

    #[test]
    fn test_violations_fail_as_data_quality() {
        let mut results = BTreeMap::new();
        results.insert(
            "completeness".to_string(),
            RuleResult::new("r", BTreeSet::from([key()])),
        );

        let report = ValidationReport::from_rule_outcomes(results, Vec::new(), 1);
        assert_eq!(report.overall, Verdict::Fail);
        assert_eq!(report.outcome(), Outcome::DataQualityFailure);
        assert_eq!(report.violation_count(), 1);
        assert_eq!(report.outcome().exit_code(), 1);
    }

    #[test]
    fn test_fault_fails_as_infrastructure() {
        let fault = RuleExecutionError::other("flag_consistency", "boom");
        let report = ValidationReport::from_rule_outcomes(
            BTreeMap::new(),
            vec![("flag_consistency".to_string(), fault.clone())],
            1,
        );

        assert!(!report.passed());
        assert_eq!(report.outcome(), Outcome::InfrastructureFailure);
        assert_eq!(report.rule_error("flag_consistency"), Some(&fault));
        assert!(report.violations("flag_consistency").is_none());
    }

    #[test]
    fn test_faults_filed_under_paired_name() {
        let faults = vec![
            ("humidity_gate".to_string(), RuleExecutionError::other("schema", "a")),
            ("wind_gate".to_string(), RuleExecutionError::other("schema", "b")),
        ];
        let report = ValidationReport::from_rule_outcomes(BTreeMap::new(), faults, 1);

        assert_eq!(
            report.errors.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["humidity_gate", "wind_gate"]
        );
        assert!(report.schema_error().is_none());
    }

    #[test]
    fn test_schema_failure_has_no_rule_results() {
        let err = SchemaError::new(vec![ColumnIssue::missing("row_count")]);
        let report = ValidationReport::schema_failure(err.clone());

        assert_eq!(report.overall, Verdict::Fail);
        assert!(report.rule_results.is_empty());
        assert_eq!(report.schema_error(), Some(&err));
        assert_eq!(report.outcome().exit_code(), 2);
    }

    #[test]
    fn test_json_shape() {
        let report =
            ValidationReport::schema_failure(SchemaError::new(vec![ColumnIssue::missing("date")]));
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["overall"], "fail");
        assert_eq!(value["rows_examined"], 0);
        assert_eq!(value["errors"]["schema"]["kind"], "schema_error");
        assert_eq!(
            value["errors"]["schema"]["detail"]["issues"][0]["column"],
            "date"
        );
    }
}
