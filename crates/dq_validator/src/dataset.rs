//! Dataset representation for validation.
//!
//! A dataset is a set of rows plus the columns it declares. Rows are dynamic
//! maps from column name to [`DataValue`], so a dataset can lack or mistype a
//! column and the schema contract check has something to find.

use chrono::NaiveDate;
use dq_core::{ColumnSpec, ColumnType, FixtureRow, columns};
use std::collections::HashMap;

/// A value in a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Calendar date
    Date(NaiveDate),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns the column type of this value.
    pub fn column_type(&self) -> ColumnType {
        match self {
            DataValue::Null => ColumnType::Null,
            DataValue::String(_) => ColumnType::String,
            DataValue::Int(_) => ColumnType::Int64,
            DataValue::Float(_) => ColumnType::Float64,
            DataValue::Bool(_) => ColumnType::Boolean,
            DataValue::Date(_) => ColumnType::Date,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        self.column_type().name()
    }

    /// Attempts to get this value as a string.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get this value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DataValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl From<NaiveDate> for DataValue {
    fn from(d: NaiveDate) -> Self {
        DataValue::Date(d)
    }
}

/// A single row of data.
pub type DataRow = HashMap<String, DataValue>;

/// Converts a fixture row into a dataset row.
pub fn fixture_to_row(fixture: &FixtureRow) -> DataRow {
    let mut row = DataRow::new();
    row.insert(columns::DATE.to_string(), fixture.date.into());
    row.insert(columns::LOCATION_LAT.to_string(), fixture.location_lat.into());
    row.insert(columns::LOCATION_LON.to_string(), fixture.location_lon.into());
    row.insert(columns::ROW_COUNT.to_string(), fixture.row_count.into());
    row.insert(columns::AVG_TEMP_C.to_string(), fixture.avg_temp_c.into());
    row.insert(columns::MAX_WIND_KMH.to_string(), fixture.max_wind_kmh.into());
    row.insert(
        columns::MIN_HUMIDITY_PCT.to_string(),
        fixture.min_humidity_pct.into(),
    );
    row.insert(columns::DQ_PASSED.to_string(), fixture.dq_passed.into());
    row
}

/// A dataset containing multiple rows.
///
/// Column declarations are either given up front (a table with a known
/// schema, possibly without rows) or inferred from the rows as they are added.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    columns: Vec<ColumnSpec>,
    rows: Vec<DataRow>,
}

impl DataSet {
    /// Creates a new empty dataset without declared columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an empty dataset with declared columns.
    pub fn with_columns(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a new dataset from rows, inferring the columns.
    pub fn from_rows(rows: Vec<DataRow>) -> Self {
        rows.into_iter().collect()
    }

    /// Creates a dataset from fixture rows.
    pub fn from_fixture(fixtures: &[FixtureRow]) -> Self {
        let mut dataset = Self::with_columns(dq_core::SchemaContract::silver_daily().columns);
        for fixture in fixtures {
            dataset.add_row(fixture_to_row(fixture));
        }
        dataset
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the declared columns.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Looks up a declared column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns an iterator over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.iter()
    }

    /// Gets a specific row by index.
    pub fn get_row(&self, index: usize) -> Option<&DataRow> {
        self.rows.get(index)
    }

    /// Adds a row to the dataset.
    ///
    /// Columns the row introduces are declared with the type of their value.
    /// A column declared as `null` takes the type of the first non-null value.
    pub fn add_row(&mut self, row: DataRow) {
        for (name, value) in &row {
            match self.columns.iter_mut().find(|c| &c.name == name) {
                Some(spec) if spec.column_type == ColumnType::Null && !value.is_null() => {
                    spec.column_type = value.column_type();
                }
                Some(_) => {}
                None => self
                    .columns
                    .push(ColumnSpec::new(name.clone(), value.column_type())),
            }
        }
        self.rows.push(row);
    }

    /// Removes a column from the declaration and from every row.
    pub fn drop_column(&mut self, name: &str) {
        self.columns.retain(|c| c.name != name);
        for row in &mut self.rows {
            row.remove(name);
        }
    }
}

impl FromIterator<DataRow> for DataSet {
    fn from_iter<T: IntoIterator<Item = DataRow>>(iter: T) -> Self {
        let mut dataset = DataSet::empty();
        for row in iter {
            dataset.add_row(row);
        }
        dataset
    }
}
