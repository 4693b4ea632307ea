// Row Normalization - PgRow to driver-neutral Record

use crate::error::map_sqlx_error;
use pgscout_core::domain::{Record, ScalarValue};
use pgscout_core::error::Result;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo};
use tracing::warn;

/// Zip the result's column names with one row's values, preserving column
/// order. No type coercion: each cell maps onto the closest scalar variant.
pub(crate) fn decode_row(row: &PgRow) -> Result<Record> {
    let mut fields = Vec::with_capacity(row.columns().len());
    for (idx, column) in row.columns().iter().enumerate() {
        let value =
            decode_cell(row, idx, column.type_info().name()).map_err(map_sqlx_error)?;
        fields.push((column.name().to_string(), value));
    }
    Ok(Record::new(fields))
}

fn opt<T>(value: Option<T>, wrap: impl FnOnce(T) -> ScalarValue) -> ScalarValue {
    value.map(wrap).unwrap_or(ScalarValue::Null)
}

fn decode_cell(row: &PgRow, idx: usize, type_name: &str) -> std::result::Result<ScalarValue, sqlx::Error> {
    let value = match type_name {
        "BOOL" => opt(row.try_get::<Option<bool>, _>(idx)?, ScalarValue::Bool),
        "INT2" => opt(row.try_get::<Option<i16>, _>(idx)?, ScalarValue::Int16),
        "INT4" => opt(row.try_get::<Option<i32>, _>(idx)?, ScalarValue::Int32),
        "INT8" => opt(row.try_get::<Option<i64>, _>(idx)?, ScalarValue::Int64),
        "OID" => opt(
            row.try_get::<Option<sqlx::postgres::types::Oid>, _>(idx)?,
            |oid| ScalarValue::Int64(i64::from(oid.0)),
        ),
        "FLOAT4" => opt(row.try_get::<Option<f32>, _>(idx)?, ScalarValue::Float32),
        "FLOAT8" => opt(row.try_get::<Option<f64>, _>(idx)?, ScalarValue::Float64),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            opt(row.try_get::<Option<String>, _>(idx)?, ScalarValue::Text)
        }
        "BYTEA" => opt(row.try_get::<Option<Vec<u8>>, _>(idx)?, ScalarValue::Bytes),
        "UUID" => opt(row.try_get::<Option<uuid::Uuid>, _>(idx)?, ScalarValue::Uuid),
        "JSON" | "JSONB" => opt(
            row.try_get::<Option<serde_json::Value>, _>(idx)?,
            ScalarValue::Json,
        ),
        "DATE" => opt(
            row.try_get::<Option<chrono::NaiveDate>, _>(idx)?,
            ScalarValue::Date,
        ),
        "TIME" => opt(
            row.try_get::<Option<chrono::NaiveTime>, _>(idx)?,
            ScalarValue::Time,
        ),
        "TIMESTAMP" => opt(
            row.try_get::<Option<chrono::NaiveDateTime>, _>(idx)?,
            ScalarValue::Timestamp,
        ),
        "TIMESTAMPTZ" => opt(
            row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)?,
            ScalarValue::TimestampTz,
        ),
        "TEXT[]" | "VARCHAR[]" | "NAME[]" => opt(row.try_get::<Option<Vec<String>>, _>(idx)?, |arr| {
            ScalarValue::Array(arr.into_iter().map(ScalarValue::Text).collect())
        }),
        "INT2[]" => opt(row.try_get::<Option<Vec<i16>>, _>(idx)?, |arr| {
            ScalarValue::Array(arr.into_iter().map(ScalarValue::Int16).collect())
        }),
        "INT4[]" => opt(row.try_get::<Option<Vec<i32>>, _>(idx)?, |arr| {
            ScalarValue::Array(arr.into_iter().map(ScalarValue::Int32).collect())
        }),
        "INT8[]" => opt(row.try_get::<Option<Vec<i64>>, _>(idx)?, |arr| {
            ScalarValue::Array(arr.into_iter().map(ScalarValue::Int64).collect())
        }),
        other => {
            // Custom types (enums, pg_lsn, inet, ...) have no typed decode
            // here; probes cast them to text when the value matters.
            warn!(column_type = other, "unsupported column type, passing NULL");
            ScalarValue::Null
        }
    };

    Ok(value)
}
