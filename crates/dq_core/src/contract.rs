//! Schema contract for the silver daily table.
//!
//! The contract declares which columns a dataset must expose and with which
//! types. It is checked once per validation run, before any rule executes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names of the silver daily table.
pub mod columns {
    pub const DATE: &str = "date";
    pub const LOCATION_LAT: &str = "location_lat";
    pub const LOCATION_LON: &str = "location_lon";
    pub const ROW_COUNT: &str = "row_count";
    pub const AVG_TEMP_C: &str = "avg_temp_c";
    pub const MAX_WIND_KMH: &str = "max_wind_kmh";
    pub const MIN_HUMIDITY_PCT: &str = "min_humidity_pct";
    pub const DQ_PASSED: &str = "dq_passed";
}

/// Logical type of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Calendar date without time zone
    Date,
    /// Double precision floating point
    Float64,
    /// Signed 64-bit integer
    Int64,
    /// Boolean flag
    Boolean,
    /// UTF-8 string
    String,
    /// Column whose type could not be determined (all values null)
    Null,
    /// Column of a source type with no dataset counterpart
    Unsupported,
}

impl ColumnType {
    /// Returns the type name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Date => "date",
            ColumnType::Float64 => "float64",
            ColumnType::Int64 => "int64",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
            ColumnType::Null => "null",
            ColumnType::Unsupported => "unsupported",
        }
    }

    /// Returns true if a column of type `actual` satisfies this expected type.
    ///
    /// Integers are accepted where floats are expected.
    pub fn accepts(&self, actual: ColumnType) -> bool {
        *self == actual || matches!((self, actual), (ColumnType::Float64, ColumnType::Int64))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A required column of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,

    /// Expected type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Integer values must be `>= 0`
    #[serde(default)]
    pub non_negative: bool,
}

impl ColumnSpec {
    /// Creates a new column spec.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            non_negative: false,
        }
    }

    /// Marks the column as a non-negative count.
    pub fn non_negative(mut self) -> Self {
        self.non_negative = true;
        self
    }
}

/// The set of columns and types a dataset must expose.
///
/// Datasets may carry extra columns; only the declared ones are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaContract {
    /// Contract name (usually the table it describes)
    pub name: String,

    /// Required columns, in declaration order
    pub columns: Vec<ColumnSpec>,
}

impl SchemaContract {
    /// The contract of the `weather_silver.daily` table.
    pub fn silver_daily() -> Self {
        crate::SchemaContractBuilder::new("weather_silver.daily")
            .column(columns::DATE, ColumnType::Date)
            .column(columns::LOCATION_LAT, ColumnType::Float64)
            .column(columns::LOCATION_LON, ColumnType::Float64)
            .column_spec(ColumnSpec::new(columns::ROW_COUNT, ColumnType::Int64).non_negative())
            .column(columns::AVG_TEMP_C, ColumnType::Float64)
            .column(columns::MAX_WIND_KMH, ColumnType::Float64)
            .column(columns::MIN_HUMIDITY_PCT, ColumnType::Float64)
            .column(columns::DQ_PASSED, ColumnType::Boolean)
            .build()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the required column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

impl Default for SchemaContract {
    fn default() -> Self {
        Self::silver_daily()
    }
}
