//! Type conversion between Arrow and dataset types.

use arrow_array::cast::AsArray;
use arrow_array::types::{
    Date32Type, Date64Type, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type,
    UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};
use arrow_array::{Array, ArrayRef, ArrowPrimitiveType, RecordBatch};
use arrow_schema::{DataType, Schema};
use dq_core::{ColumnSpec, ColumnType};
use dq_validator::{DataRow, DataSet, DataValue, ProviderError};
use tracing::warn;

/// Maps an Arrow type to the dataset column type.
///
/// Types without a counterpart map to [`ColumnType::Unsupported`], so the
/// schema check reports them as a type mismatch of the declared column.
pub fn arrow_type_to_column_type(data_type: &DataType) -> ColumnType {
    match data_type {
        DataType::Boolean => ColumnType::Boolean,
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => ColumnType::Int64,
        DataType::Float32 | DataType::Float64 => ColumnType::Float64,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => ColumnType::String,
        DataType::Date32 | DataType::Date64 => ColumnType::Date,
        DataType::Null => ColumnType::Null,
        _ => ColumnType::Unsupported,
    }
}

/// Declares one dataset column per Arrow field.
pub fn schema_to_columns(schema: &Schema) -> Vec<ColumnSpec> {
    schema
        .fields()
        .iter()
        .map(|field| ColumnSpec::new(field.name(), arrow_type_to_column_type(field.data_type())))
        .collect()
}

/// Converts record batches into a dataset with the columns of `schema`.
///
/// The schema is passed separately so that a table without rows still
/// declares its columns.
pub fn batches_to_dataset(schema: &Schema, batches: &[RecordBatch]) -> Result<DataSet, ProviderError> {
    let mut dataset = DataSet::with_columns(schema_to_columns(schema));

    for batch in batches {
        let batch_schema = batch.schema();
        let columns = batch
            .columns()
            .iter()
            .zip(batch_schema.fields())
            .map(|(array, field)| Ok((field.name().clone(), array_to_values(array, field.name())?)))
            .collect::<Result<Vec<_>, ProviderError>>()?;

        for row_idx in 0..batch.num_rows() {
            let row: DataRow = columns
                .iter()
                .map(|(name, values)| (name.clone(), values[row_idx].clone()))
                .collect();
            dataset.add_row(row);
        }
    }

    Ok(dataset)
}

/// Converts every value of an Arrow array.
pub fn array_to_values(array: &ArrayRef, column: &str) -> Result<Vec<DataValue>, ProviderError> {
    match array.data_type() {
        DataType::Boolean => {
            let typed = array
                .as_boolean_opt()
                .ok_or_else(|| downcast_error(column, array.data_type()))?;
            Ok(typed
                .iter()
                .map(|v| v.map(DataValue::Bool).unwrap_or(DataValue::Null))
                .collect())
        }
        DataType::Int8 => primitive::<Int8Type>(array, column, |v| DataValue::Int(v.into())),
        DataType::Int16 => primitive::<Int16Type>(array, column, |v| DataValue::Int(v.into())),
        DataType::Int32 => primitive::<Int32Type>(array, column, |v| DataValue::Int(v.into())),
        DataType::Int64 => primitive::<Int64Type>(array, column, DataValue::Int),
        DataType::UInt8 => primitive::<UInt8Type>(array, column, |v| DataValue::Int(v.into())),
        DataType::UInt16 => primitive::<UInt16Type>(array, column, |v| DataValue::Int(v.into())),
        DataType::UInt32 => primitive::<UInt32Type>(array, column, |v| DataValue::Int(v.into())),
        DataType::UInt64 => {
            let typed = array
                .as_primitive_opt::<UInt64Type>()
                .ok_or_else(|| downcast_error(column, array.data_type()))?;
            typed
                .iter()
                .map(|v| match v {
                    None => Ok(DataValue::Null),
                    Some(v) => i64::try_from(v).map(DataValue::Int).map_err(|_| {
                        ProviderError::conversion(column, format!("{} does not fit in int64", v))
                    }),
                })
                .collect()
        }
        DataType::Float32 => primitive::<Float32Type>(array, column, |v| DataValue::Float(v.into())),
        DataType::Float64 => primitive::<Float64Type>(array, column, DataValue::Float),
        DataType::Utf8 => {
            let typed = array
                .as_string_opt::<i32>()
                .ok_or_else(|| downcast_error(column, array.data_type()))?;
            Ok(typed.iter().map(string_value).collect())
        }
        DataType::LargeUtf8 => {
            let typed = array
                .as_string_opt::<i64>()
                .ok_or_else(|| downcast_error(column, array.data_type()))?;
            Ok(typed.iter().map(string_value).collect())
        }
        DataType::Utf8View => {
            let typed = array
                .as_string_view_opt()
                .ok_or_else(|| downcast_error(column, array.data_type()))?;
            Ok(typed.iter().map(string_value).collect())
        }
        DataType::Date32 => {
            let typed = array
                .as_primitive_opt::<Date32Type>()
                .ok_or_else(|| downcast_error(column, array.data_type()))?;
            (0..typed.len())
                .map(|i| date_value(typed.is_null(i), typed.value_as_date(i), column))
                .collect()
        }
        DataType::Date64 => {
            let typed = array
                .as_primitive_opt::<Date64Type>()
                .ok_or_else(|| downcast_error(column, array.data_type()))?;
            (0..typed.len())
                .map(|i| date_value(typed.is_null(i), typed.value_as_date(i), column))
                .collect()
        }
        other => {
            warn!(column, data_type = %other, "Unsupported Arrow type, reading as null");
            Ok(vec![DataValue::Null; array.len()])
        }
    }
}

fn primitive<T: ArrowPrimitiveType>(
    array: &ArrayRef,
    column: &str,
    convert: impl Fn(T::Native) -> DataValue,
) -> Result<Vec<DataValue>, ProviderError> {
    let typed = array
        .as_primitive_opt::<T>()
        .ok_or_else(|| downcast_error(column, array.data_type()))?;
    Ok(typed
        .iter()
        .map(|v| v.map(&convert).unwrap_or(DataValue::Null))
        .collect())
}

fn string_value(value: Option<&str>) -> DataValue {
    value.map(DataValue::from).unwrap_or(DataValue::Null)
}

fn date_value(
    is_null: bool,
    date: Option<chrono::NaiveDate>,
    column: &str,
) -> Result<DataValue, ProviderError> {
    if is_null {
        return Ok(DataValue::Null);
    }
    date.map(DataValue::Date)
        .ok_or_else(|| ProviderError::conversion(column, "date out of range"))
}

fn downcast_error(column: &str, data_type: &DataType) -> ProviderError {
    ProviderError::conversion(column, format!("failed to downcast {} array", data_type))
}
