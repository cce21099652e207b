//! Error types for validation runs.
//!
//! Two kinds of error mean the validation process itself is broken and need
//! different triage from a data-quality failure:
//!
//! - [`SchemaError`]: the dataset does not honour the schema contract. Fatal for
//!   the run; no rule executes.
//! - [`RuleExecutionError`]: one rule faulted. Recorded against that rule while
//!   the remaining rules still run.
//!
//! A report whose rules merely found violations carries neither of these.

use crate::ColumnType;
use serde::Serialize;
use thiserror::Error;

/// A single way in which a dataset breaks the schema contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ColumnIssue {
    /// Required column absent from the dataset or from a row
    #[error("column '{column}' is missing{}", at_row(.row))]
    Missing { column: String, row: Option<usize> },

    /// Column declared or holding values of an incompatible type
    #[error("column '{column}' has type {actual}, expected {expected}{}", at_row(.row))]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
        row: Option<usize>,
    },

    /// Null value in a required column
    #[error("column '{column}' is null in row {row}")]
    Null { column: String, row: usize },

    /// Negative value in a count column
    #[error("column '{column}' is negative ({value}) in row {row}")]
    Negative {
        column: String,
        row: usize,
        value: i64,
    },
}

fn at_row(row: &Option<usize>) -> String {
    row.map(|r| format!(" in row {}", r)).unwrap_or_default()
}

impl ColumnIssue {
    /// Creates a missing-column issue for the dataset as a whole.
    pub fn missing(column: impl Into<String>) -> Self {
        Self::Missing {
            column: column.into(),
            row: None,
        }
    }

    /// Creates a missing-column issue for a single row.
    pub fn missing_in_row(column: impl Into<String>, row: usize) -> Self {
        Self::Missing {
            column: column.into(),
            row: Some(row),
        }
    }

    /// Creates a type mismatch issue.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: ColumnType,
        actual: ColumnType,
        row: Option<usize>,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected,
            actual,
            row,
        }
    }

    /// Creates a null value issue.
    pub fn null(column: impl Into<String>, row: usize) -> Self {
        Self::Null {
            column: column.into(),
            row,
        }
    }

    /// Returns the column this issue concerns.
    pub fn column(&self) -> &str {
        match self {
            ColumnIssue::Missing { column, .. }
            | ColumnIssue::TypeMismatch { column, .. }
            | ColumnIssue::Null { column, .. }
            | ColumnIssue::Negative { column, .. } => column,
        }
    }
}

/// The dataset does not honour the schema contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("Schema validation failed: {}", join_issues(.issues))]
pub struct SchemaError {
    /// Every issue found, in discovery order
    pub issues: Vec<ColumnIssue>,
}

fn join_issues(issues: &[ColumnIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl SchemaError {
    /// Creates a schema error from the collected issues.
    pub fn new(issues: Vec<ColumnIssue>) -> Self {
        Self { issues }
    }

    /// Returns the distinct column names named by this error, in discovery order.
    pub fn columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for issue in &self.issues {
            if !names.contains(&issue.column()) {
                names.push(issue.column());
            }
        }
        names
    }

    /// Returns true if any issue concerns `column`.
    pub fn names_column(&self, column: &str) -> bool {
        self.issues.iter().any(|i| i.column() == column)
    }
}

/// A rule faulted while evaluating a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum RuleExecutionError {
    /// A column value could not be read with the type the rule expects
    #[error("rule '{rule}' could not read column '{column}' in row {row}: {message}")]
    ColumnAccess {
        rule: String,
        column: String,
        row: usize,
        message: String,
    },

    /// The rule panicked
    #[error("rule '{rule}' panicked: {message}")]
    Panicked { rule: String, message: String },

    /// Any other rule failure
    #[error("rule '{rule}' failed: {message}")]
    Other { rule: String, message: String },
}

impl RuleExecutionError {
    /// Creates a column access error.
    pub fn column_access(
        rule: impl Into<String>,
        column: impl Into<String>,
        row: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::ColumnAccess {
            rule: rule.into(),
            column: column.into(),
            row,
            message: message.into(),
        }
    }

    /// Creates a panic error.
    pub fn panicked(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Panicked {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Creates a generic rule error.
    pub fn other(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Returns the name of the rule that faulted.
    pub fn rule(&self) -> &str {
        match self {
            RuleExecutionError::ColumnAccess { rule, .. }
            | RuleExecutionError::Panicked { rule, .. }
            | RuleExecutionError::Other { rule, .. } => rule,
        }
    }

    /// Re-attributes the error to `name`, replacing whatever rule name it
    /// was created with.
    pub fn attributed_to(mut self, name: impl Into<String>) -> Self {
        match &mut self {
            RuleExecutionError::ColumnAccess { rule, .. }
            | RuleExecutionError::Panicked { rule, .. }
            | RuleExecutionError::Other { rule, .. } => *rule = name.into(),
        }
        self
    }
}
