//! Error types for rule sets and dataset providers.

use dq_core::SCHEMA_ENTRY;
use thiserror::Error;

/// A rule set could not be assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    /// Two rules share a name
    #[error("Duplicate rule name '{0}'")]
    DuplicateName(String),

    /// A rule uses a name reserved for report attribution
    #[error("Rule name '{0}' is reserved")]
    ReservedName(String),
}

impl RuleSetError {
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    /// Creates the error for a rule named after the schema entry.
    pub fn reserved() -> Self {
        Self::ReservedName(SCHEMA_ENTRY.to_string())
    }
}

/// A dataset provider could not produce a dataset.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The source is not reachable or the table is not registered
    #[error("Source '{source_name}' is unavailable: {message}")]
    Unavailable {
        source_name: String,
        message: String,
    },

    /// The source was reached but reading it failed
    #[error("Failed to read '{source_name}': {message}")]
    Read {
        source_name: String,
        message: String,
    },

    /// A value could not be converted into a dataset value
    #[error("Conversion error in column '{column}': {message}")]
    Conversion { column: String, message: String },
}

impl ProviderError {
    pub fn unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn read(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn conversion(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            column: column.into(),
            message: message.into(),
        }
    }
}
