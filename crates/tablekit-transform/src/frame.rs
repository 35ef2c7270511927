//! Conversion between [`Table`] and Polars DataFrames.
//!
//! Numeric columns map to `Float64`, text columns to `String`, and columns
//! holding only missing markers to an all-null `Float64`. In the other
//! direction, integer and float dtypes become numbers, strings stay text,
//! nulls become missing, and any other dtype is rendered to text.

use polars::prelude::{AnyValue, Column as FrameColumn, DataFrame, NamedFrom, Series};
use tablekit_model::{Column, ColumnKind, Table, Value};
use tracing::debug;

use crate::error::Result;

/// Build a DataFrame with one column per table column, in order.
pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let mut columns: Vec<FrameColumn> = Vec::with_capacity(table.width());
    for column in table.columns() {
        let name = column.name();
        let series = match column.kind() {
            ColumnKind::Text => {
                let values: Vec<Option<&str>> =
                    column.values().iter().map(Value::as_text).collect();
                Series::new(name.into(), values)
            }
            ColumnKind::Numeric | ColumnKind::Missing => {
                let values: Vec<Option<f64>> =
                    column.values().iter().map(Value::as_number).collect();
                Series::new(name.into(), values)
            }
        };
        columns.push(series.into());
    }
    let df = DataFrame::new(columns)?;
    debug!(rows = df.height(), columns = df.width(), "Built DataFrame from table");
    Ok(df)
}

/// Build a table from a DataFrame, reading every cell.
pub fn table_from_dataframe(df: &DataFrame) -> Result<Table> {
    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for frame_column in df.get_columns() {
        let mut values: Vec<Value> = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            values.push(any_to_value(frame_column.get(idx).unwrap_or(AnyValue::Null)));
        }
        columns.push(Column::new(frame_column.name().as_str(), values)?);
    }
    Ok(Table::new(columns)?)
}

fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Missing,
        AnyValue::String(s) => Value::text(s),
        AnyValue::StringOwned(s) => Value::text(s.as_str()),
        AnyValue::Float64(v) => Value::Number(v),
        AnyValue::Float32(v) => Value::Number(f64::from(v)),
        AnyValue::Int8(v) => Value::Number(f64::from(v)),
        AnyValue::Int16(v) => Value::Number(f64::from(v)),
        AnyValue::Int32(v) => Value::Number(f64::from(v)),
        AnyValue::Int64(v) => Value::Number(v as f64),
        AnyValue::UInt8(v) => Value::Number(f64::from(v)),
        AnyValue::UInt16(v) => Value::Number(f64::from(v)),
        AnyValue::UInt32(v) => Value::Number(f64::from(v)),
        AnyValue::UInt64(v) => Value::Number(v as f64),
        other => Value::Text(other.to_string()),
    }
}
