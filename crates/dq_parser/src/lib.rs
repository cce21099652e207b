//! Parser for Silver data quality configurations (YAML/TOML formats).
//!
//! This crate parses validation configurations into the strongly-typed
//! [`ValidationConfig`] and checks them for mistakes serde cannot catch:
//! malformed table identifiers, inverted range bounds and range checks on
//! columns that are not float columns of the schema contract.
//!
//! # Example
//!
//! ```rust
//! use dq_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: berlin_daily
//! current_date: 2025-07-16
//! source:
//!   type: fixture
//! rules:
//!   completeness:
//!     enabled: true
//! "#;
//!
//! let config = parse_yaml(yaml).expect("Failed to parse config");
//! assert_eq!(config.name, "berlin_daily");
//! ```

use dq_core::{ColumnType, SchemaContract, SourceConfig, ValidationConfig};
use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The configuration parsed but is not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Identifier of a table, optionally qualified by schema and catalog.
const TABLE_IDENT_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*){0,2}$";

/// Parse a configuration from a YAML string.
pub fn parse_yaml(content: &str) -> Result<ValidationConfig> {
    let config: ValidationConfig = serde_yaml_ng::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a configuration from a TOML string.
///
/// Dates must be quoted (`current_date = "2025-07-16"`); TOML's native date
/// literals are not accepted.
///
/// # Example
///
/// ```rust
/// use dq_parser::parse_toml;
///
/// let toml = r#"
/// current_date = "2025-07-16"
///
/// [source]
/// type = "live"
/// path = "data/daily.csv"
/// "#;
///
/// let config = parse_toml(toml).unwrap();
/// assert!(config.current_date.is_some());
/// ```
pub fn parse_toml(content: &str) -> Result<ValidationConfig> {
    let config: ValidationConfig =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Detect the configuration format from a file path based on its extension.
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<ConfigFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a configuration from a file with automatic format detection.
pub fn parse_file(path: &Path) -> Result<ValidationConfig> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        ConfigFormat::Yaml => parse_yaml(&content),
        ConfigFormat::Toml => parse_toml(&content),
    }
}

/// Render a configuration in the given format.
pub fn render(config: &ValidationConfig, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Yaml => Ok(serde_yaml_ng::to_string(config)?),
        ConfigFormat::Toml => {
            toml::to_string_pretty(config).map_err(|e| ParserError::TomlError(e.to_string()))
        }
    }
}

/// Checks a parsed configuration against the schema contract.
pub fn validate_config(config: &ValidationConfig) -> Result<()> {
    if let SourceConfig::Live(live) = &config.source {
        let pattern = Regex::new(TABLE_IDENT_PATTERN)
            .map_err(|e| ParserError::Invalid(format!("table pattern: {}", e)))?;
        if !pattern.is_match(&live.table) {
            return Err(ParserError::Invalid(format!(
                "'{}' is not a valid table identifier",
                live.table
            )));
        }
        if live.path.trim().is_empty() {
            return Err(ParserError::Invalid(
                "live source requires a non-empty path".to_string(),
            ));
        }
    }

    if config.rules.completeness.expected_row_count < 0 {
        return Err(ParserError::Invalid(format!(
            "expected_row_count must not be negative, got {}",
            config.rules.completeness.expected_row_count
        )));
    }

    let contract = SchemaContract::silver_daily();
    for range in &config.rules.ranges {
        match contract.column(&range.column) {
            Some(spec) if spec.column_type == ColumnType::Float64 => {}
            Some(spec) => {
                return Err(ParserError::Invalid(format!(
                    "range check on '{}' requires a float64 column, found {}",
                    range.column, spec.column_type
                )));
            }
            None => {
                return Err(ParserError::Invalid(format!(
                    "range check on unknown column '{}'",
                    range.column
                )));
            }
        }
        if range.min.is_nan() || range.max.is_nan() || range.min > range.max {
            return Err(ParserError::Invalid(format!(
                "range for '{}' has invalid bounds [{}, {}]",
                range.column, range.min, range.max
            )));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for range in &config.rules.ranges {
        if !seen.insert(range.column.as_str()) {
            return Err(ParserError::Invalid(format!(
                "duplicate range check for '{}'",
                range.column
            )));
        }
    }

    Ok(())
}
