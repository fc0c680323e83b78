//! Conversion between dynamic tables and Arrow record batches.

use std::{collections::HashMap, sync::Arc};

use arrow_array::{
    cast::AsArray,
    types::{
        Date32Type, Decimal128Type, Float16Type, Float32Type, Float64Type, Int16Type, Int32Type,
        Int64Type, Int8Type, Time32MillisecondType, Time64MicrosecondType, Time64NanosecondType,
        TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType, UInt16Type,
        UInt32Type, UInt64Type, UInt8Type,
    },
    Array, ArrayRef, BinaryArray, BooleanArray, Decimal128Array, FixedSizeBinaryArray,
    PrimitiveArray, RecordBatch, RecordBatchOptions, StringArray, Time32MillisecondArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
};
use arrow_buffer::{BooleanBuffer, ScalarBuffer};
use arrow_schema::{ArrowError, DataType, Field, Schema, TimeUnit as ArrowTimeUnit};
use parquet::basic::LogicalType;
use typed_parquet::schema::TimeUnit;
use uuid::Uuid;

use crate::{values::ColumnValues, ColumnData, DynColumn, DynError, DynTable};

const UTC: &str = "UTC";

macro_rules! primitive {
    ($values:expr, $atype:ty) => {
        Arc::new(PrimitiveArray::<$atype>::new(
            ScalarBuffer::from($values.values().to_vec()),
            $values.nulls(),
        )) as ArrayRef
    };
}

impl DynColumn {
    /// Convert to an Arrow array.
    ///
    /// `decimal` supplies precision and scale for decimal columns and is ignored for
    /// every other kind. Timestamps adjusted to UTC carry the `"UTC"` timezone.
    ///
    /// # Errors
    /// Returns [`DynError::Configuration`] for a decimal column without precision and
    /// scale, and [`DynError::Arrow`] when arrow rejects the values.
    pub fn to_arrow(&self, decimal: Option<(u8, i8)>) -> Result<ArrayRef, DynError> {
        let array: ArrayRef = match self.data() {
            ColumnData::Bool(v) => Arc::new(BooleanArray::new(
                BooleanBuffer::from(v.values()),
                v.nulls(),
            )),
            ColumnData::Int8(v) => primitive!(v, Int8Type),
            ColumnData::Int16(v) => primitive!(v, Int16Type),
            ColumnData::Int32(v) => primitive!(v, Int32Type),
            ColumnData::Int64(v) => primitive!(v, Int64Type),
            ColumnData::UInt8(v) => primitive!(v, UInt8Type),
            ColumnData::UInt16(v) => primitive!(v, UInt16Type),
            ColumnData::UInt32(v) => primitive!(v, UInt32Type),
            ColumnData::UInt64(v) => primitive!(v, UInt64Type),
            ColumnData::Float16(v) => primitive!(v, Float16Type),
            ColumnData::Float32(v) => primitive!(v, Float32Type),
            ColumnData::Float64(v) => primitive!(v, Float64Type),
            ColumnData::Utf8(v) => Arc::new(
                v.iter()
                    .map(|s| s.map(String::as_str))
                    .collect::<StringArray>(),
            ),
            ColumnData::Binary(v) => Arc::new(
                v.iter()
                    .map(|b| b.map(Vec::as_slice))
                    .collect::<BinaryArray>(),
            ),
            ColumnData::Decimal(v) => {
                let (precision, scale) = decimal.ok_or_else(|| DynError::Configuration {
                    column: self.name().to_string(),
                    message: "decimal precision and scale must be specified".to_string(),
                })?;
                Arc::new(
                    Decimal128Array::new(ScalarBuffer::from(v.values().to_vec()), v.nulls())
                        .with_precision_and_scale(precision, scale)?,
                )
            }
            ColumnData::Date(v) => primitive!(v, Date32Type),
            ColumnData::Time { unit, values, .. } => match unit {
                TimeUnit::Millis => {
                    let millis = values
                        .values()
                        .iter()
                        .map(|&t| {
                            i32::try_from(t).map_err(|_| {
                                ArrowError::InvalidArgumentError(format!(
                                    "time {t} ms does not fit Time32"
                                ))
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Arc::new(Time32MillisecondArray::new(
                        ScalarBuffer::from(millis),
                        values.nulls(),
                    ))
                }
                TimeUnit::Micros => primitive!(values, Time64MicrosecondType),
                TimeUnit::Nanos => primitive!(values, Time64NanosecondType),
            },
            ColumnData::Timestamp {
                unit,
                utc_adjusted,
                values,
            } => {
                let tz = utc_adjusted.then_some(UTC);
                let buffer = ScalarBuffer::from(values.values().to_vec());
                match unit {
                    TimeUnit::Millis => Arc::new(
                        TimestampMillisecondArray::new(buffer, values.nulls())
                            .with_timezone_opt(tz),
                    ),
                    TimeUnit::Micros => Arc::new(
                        TimestampMicrosecondArray::new(buffer, values.nulls())
                            .with_timezone_opt(tz),
                    ),
                    TimeUnit::Nanos => Arc::new(
                        TimestampNanosecondArray::new(buffer, values.nulls())
                            .with_timezone_opt(tz),
                    ),
                }
            }
            ColumnData::Uuid(v) => Arc::new(FixedSizeBinaryArray::try_from_sparse_iter_with_size(
                v.iter().map(|id| id.map(Uuid::as_bytes)),
                16,
            )?),
        };
        Ok(array)
    }
}

impl DynTable {
    /// Convert to an Arrow record batch.
    ///
    /// Decimal columns take precision and scale from a `DECIMAL` entry in
    /// `overrides`, as on write. A field is nullable when its column holds nulls.
    ///
    /// # Errors
    /// See [`DynColumn::to_arrow`].
    pub fn to_record_batch(
        &self,
        overrides: &HashMap<String, LogicalType>,
    ) -> Result<RecordBatch, DynError> {
        let mut fields = Vec::with_capacity(self.num_columns());
        let mut arrays = Vec::with_capacity(self.num_columns());
        for column in self.columns() {
            let decimal = match overrides.get(column.name()) {
                Some(LogicalType::Decimal { precision, scale }) => {
                    let precision = u8::try_from(*precision).ok();
                    let scale = i8::try_from(*scale).ok();
                    precision.zip(scale)
                }
                _ => None,
            };
            let array = column.to_arrow(decimal)?;
            fields.push(Field::new(
                column.name(),
                array.data_type().clone(),
                column.null_count() > 0,
            ));
            arrays.push(array);
        }
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows()));
        Ok(RecordBatch::try_new_with_options(
            Arc::new(Schema::new(fields)),
            arrays,
            &options,
        )?)
    }

    /// Build a table from an Arrow record batch.
    ///
    /// Time arrays are taken as UTC-adjusted; timestamps are UTC-adjusted when they
    /// carry a timezone. `FixedSizeBinary(16)` is read as UUIDs.
    ///
    /// # Errors
    /// Returns [`DynError::UnsupportedType`] for Arrow types outside the catalogue.
    pub fn try_from_record_batch(batch: &RecordBatch) -> Result<Self, DynError> {
        let schema = batch.schema();
        let columns = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, array)| {
                column_from_arrow(field.name(), array.as_ref())
                    .map(|data| DynColumn::new(field.name(), data))
            })
            .collect::<Result<Vec<_>, _>>()?;
        DynTable::try_new(columns)
    }
}

fn column_from_arrow(name: &str, array: &dyn Array) -> Result<ColumnData, DynError> {
    let data = match array.data_type() {
        DataType::Boolean => ColumnData::Bool(array.as_boolean().iter().collect()),
        DataType::Int8 => ColumnData::Int8(array.as_primitive::<Int8Type>().iter().collect()),
        DataType::Int16 => ColumnData::Int16(array.as_primitive::<Int16Type>().iter().collect()),
        DataType::Int32 => ColumnData::Int32(array.as_primitive::<Int32Type>().iter().collect()),
        DataType::Int64 => ColumnData::Int64(array.as_primitive::<Int64Type>().iter().collect()),
        DataType::UInt8 => ColumnData::UInt8(array.as_primitive::<UInt8Type>().iter().collect()),
        DataType::UInt16 => {
            ColumnData::UInt16(array.as_primitive::<UInt16Type>().iter().collect())
        }
        DataType::UInt32 => {
            ColumnData::UInt32(array.as_primitive::<UInt32Type>().iter().collect())
        }
        DataType::UInt64 => {
            ColumnData::UInt64(array.as_primitive::<UInt64Type>().iter().collect())
        }
        DataType::Float16 => {
            ColumnData::Float16(array.as_primitive::<Float16Type>().iter().collect())
        }
        DataType::Float32 => {
            ColumnData::Float32(array.as_primitive::<Float32Type>().iter().collect())
        }
        DataType::Float64 => {
            ColumnData::Float64(array.as_primitive::<Float64Type>().iter().collect())
        }
        DataType::Utf8 => ColumnData::Utf8(
            array
                .as_string::<i32>()
                .iter()
                .map(|s| s.map(str::to_owned))
                .collect(),
        ),
        DataType::Binary => ColumnData::Binary(
            array
                .as_binary::<i32>()
                .iter()
                .map(|b| b.map(<[u8]>::to_vec))
                .collect(),
        ),
        DataType::Decimal128(_, _) => {
            ColumnData::Decimal(array.as_primitive::<Decimal128Type>().iter().collect())
        }
        DataType::Date32 => ColumnData::Date(array.as_primitive::<Date32Type>().iter().collect()),
        DataType::Time32(ArrowTimeUnit::Millisecond) => ColumnData::Time {
            unit: TimeUnit::Millis,
            utc_adjusted: true,
            values: array
                .as_primitive::<Time32MillisecondType>()
                .iter()
                .map(|t| t.map(i64::from))
                .collect(),
        },
        DataType::Time64(ArrowTimeUnit::Microsecond) => ColumnData::Time {
            unit: TimeUnit::Micros,
            utc_adjusted: true,
            values: array
                .as_primitive::<Time64MicrosecondType>()
                .iter()
                .collect(),
        },
        DataType::Time64(ArrowTimeUnit::Nanosecond) => ColumnData::Time {
            unit: TimeUnit::Nanos,
            utc_adjusted: true,
            values: array.as_primitive::<Time64NanosecondType>().iter().collect(),
        },
        DataType::Timestamp(unit, tz) => {
            let utc_adjusted = tz.is_some();
            let (unit, values): (TimeUnit, ColumnValues<i64>) = match unit {
                ArrowTimeUnit::Millisecond => (
                    TimeUnit::Millis,
                    array
                        .as_primitive::<TimestampMillisecondType>()
                        .iter()
                        .collect(),
                ),
                ArrowTimeUnit::Microsecond => (
                    TimeUnit::Micros,
                    array
                        .as_primitive::<TimestampMicrosecondType>()
                        .iter()
                        .collect(),
                ),
                ArrowTimeUnit::Nanosecond => (
                    TimeUnit::Nanos,
                    array
                        .as_primitive::<TimestampNanosecondType>()
                        .iter()
                        .collect(),
                ),
                ArrowTimeUnit::Second => return Err(unsupported(name, array.data_type())),
            };
            ColumnData::Timestamp {
                unit,
                utc_adjusted,
                values,
            }
        }
        DataType::FixedSizeBinary(16) => ColumnData::Uuid(
            array
                .as_fixed_size_binary()
                .iter()
                .map(|b| {
                    b.map(Uuid::from_slice)
                        .transpose()
                        .map_err(|e| ArrowError::InvalidArgumentError(e.to_string()))
                })
                .collect::<Result<ColumnValues<_>, _>>()?,
        ),
        other => return Err(unsupported(name, other)),
    };
    Ok(data)
}

fn unsupported(name: &str, data_type: &DataType) -> DynError {
    DynError::UnsupportedType {
        column: name.to_string(),
        descriptor: data_type.to_string(),
    }
}
