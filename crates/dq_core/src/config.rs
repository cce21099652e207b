//! Validation configuration.
//!
//! A configuration describes where the dataset comes from, which date is
//! "today" for the completeness rule and which rules make up the rule set.
//! It is parsed from YAML or TOML by `dq_parser`.

use crate::{RowKey, columns};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default table identifier of the silver daily table.
pub const DEFAULT_TABLE: &str = "weather_silver.daily";

/// Default number of hourly observations in a closed day.
pub const HOURS_PER_DAY: i64 = 24;

/// Top-level validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Name of this validation job
    #[serde(default = "default_name")]
    pub name: String,

    /// Processing date; rows dated strictly before it are closed days.
    /// When absent the caller supplies one (the CLI uses today in UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_date: Option<NaiveDate>,

    /// Where the dataset comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// Rule set definition
    #[serde(default)]
    pub rules: RulesConfig,
}

fn default_name() -> String {
    "weather_silver_daily".to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            current_date: None,
            source: SourceConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

/// Dataset provider selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// In-memory rows
    Fixture {
        /// Rows to serve; the built-in sample row when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<Vec<FixtureRow>>,
    },

    /// A table file registered in a DataFusion session
    Live(LiveSourceConfig),
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Fixture { rows: None }
    }
}

/// Live table source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSourceConfig {
    /// Table identifier, optionally schema-qualified
    #[serde(default = "default_table")]
    pub table: String,

    /// Path of the table file or directory
    pub path: String,

    /// File format
    #[serde(default)]
    pub format: TableFormat,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

/// Physical format of a live table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Csv,
    Parquet,
    /// Newline-delimited JSON
    Json,
}

/// One row of the silver daily table, as written in a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureRow {
    pub date: NaiveDate,
    pub location_lat: f64,
    pub location_lon: f64,
    pub row_count: i64,
    pub avg_temp_c: f64,
    pub max_wind_kmh: f64,
    pub min_humidity_pct: f64,
    pub dq_passed: bool,
}

impl FixtureRow {
    /// The sample row served when no table is configured: Berlin, 2025-07-15,
    /// a complete day that passed upstream checks.
    pub fn sample() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2025, 7, 15).unwrap_or_default(),
            location_lat: 52.52,
            location_lon: 13.405,
            row_count: HOURS_PER_DAY,
            avg_temp_c: 20.0,
            max_wind_kmh: 30.0,
            min_humidity_pct: 45.0,
            dq_passed: true,
        }
    }

    /// Returns the key of this row.
    pub fn key(&self) -> RowKey {
        RowKey::new(self.date, self.location_lat, self.location_lon)
    }
}

/// Toggle for a rule without parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleConfig {
    pub enabled: bool,
}

/// Completeness rule settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Exact row count required of a closed day
    #[serde(default = "default_expected_row_count")]
    pub expected_row_count: i64,
}

impl Default for CompletenessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expected_row_count: HOURS_PER_DAY,
        }
    }
}

/// Inclusive bounds for a float column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

/// Rule set definition.
///
/// Completeness and flag consistency are on by default; key uniqueness and
/// range checks are opt-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub completeness: CompletenessConfig,

    #[serde(default = "enabled_toggle")]
    pub flag_consistency: ToggleConfig,

    #[serde(default)]
    pub key_uniqueness: ToggleConfig,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<RangeConfig>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            completeness: CompletenessConfig::default(),
            flag_consistency: enabled_toggle(),
            key_uniqueness: ToggleConfig::default(),
            ranges: Vec::new(),
        }
    }
}

impl RulesConfig {
    /// Range bounds commonly applied to the silver table's aggregates.
    pub fn physical_ranges() -> Vec<RangeConfig> {
        vec![
            RangeConfig {
                column: columns::MIN_HUMIDITY_PCT.to_string(),
                min: 0.0,
                max: 100.0,
            },
            RangeConfig {
                column: columns::MAX_WIND_KMH.to_string(),
                min: 0.0,
                max: 500.0,
            },
        ]
    }
}

fn default_true() -> bool {
    true
}

fn default_expected_row_count() -> i64 {
    HOURS_PER_DAY
}

fn enabled_toggle() -> ToggleConfig {
    ToggleConfig { enabled: true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.source, SourceConfig::Fixture { rows: None });
        assert!(config.rules.completeness.enabled);
        assert_eq!(config.rules.completeness.expected_row_count, 24);
        assert!(config.rules.flag_consistency.enabled);
        assert!(!config.rules.key_uniqueness.enabled);
        assert!(config.rules.ranges.is_empty());
    }

    #[test]
    fn test_sample_row_key() {
        let row = FixtureRow::sample();
        assert_eq!(row.key().to_string(), "(2025-07-15, 52.52, 13.405)");
        assert_eq!(row.row_count, 24);
        assert!(row.dq_passed);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: ValidationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn test_live_source_json() {
        let config: ValidationConfig = serde_json::from_str(
            r#"{"source": {"type": "live", "path": "data/daily.parquet", "format": "parquet"}}"#,
        )
        .unwrap();

        assert_eq!(
            config.source,
            SourceConfig::Live(LiveSourceConfig {
                table: DEFAULT_TABLE.to_string(),
                path: "data/daily.parquet".to_string(),
                format: TableFormat::Parquet,
            })
        );
    }
}
