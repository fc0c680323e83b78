//! Typed dispatch bridge between runtime column descriptors and typed streams.
//!
//! A [`LogicalReader`] or [`LogicalWriter`] is built once per column stream: the
//! element type is recovered from the descriptor (or the column's backing kind) at
//! construction, and [`accept`](LogicalReader::accept) then calls the visitor's
//! generic `visit` exactly once with the concrete element shape. Per-value work in
//! visitors is fully monomorphized.

use half::f16;
use parquet::{
    basic::Type as PhysicalType, column::reader::ColumnReader,
    file::writer::SerializedColumnWriter, schema::types::ColumnDescPtr,
};
use typed_parquet::{
    bridge::{DecimalStorage, LogicalElement, ParquetBinding, TimeStorage, TimeUnitSpec},
    schema::{resolve_column, ElementType, TimeUnit},
    Date, Decimal, DecimalBytes, DecimalFixed, DecimalInt32, DecimalInt64, LogicalColumnReader,
    LogicalColumnWriter, Microsecond, Millisecond, Nanosecond, Time, Timestamp,
};
use uuid::Uuid;

use crate::{values::ColumnValues, ColumnData, ColumnKind, DynError};

/// Capability of an element value type to live in a dynamic column.
pub trait DynValue: ParquetBinding {
    /// Native type stored by the matching [`ColumnData`] variant.
    type Native: Clone + Default;

    /// Locate the matching storage, `None` if `data` holds another kind.
    fn values(data: &ColumnData) -> Option<&ColumnValues<Self::Native>>;

    /// Locate the matching storage mutably, `None` if `data` holds another kind.
    fn values_mut(data: &mut ColumnData) -> Option<&mut ColumnValues<Self::Native>>;

    /// Convert into the stored native value.
    fn into_native(self) -> Self::Native;

    /// Convert from a stored native value.
    fn from_native(native: &Self::Native) -> Self;
}

macro_rules! impl_dyn_value_identity {
    ($($rust:ty => $variant:ident),* $(,)?) => {
        $(
            impl DynValue for $rust {
                type Native = $rust;
                fn values(data: &ColumnData) -> Option<&ColumnValues<$rust>> {
                    match data {
                        ColumnData::$variant(v) => Some(v),
                        _ => None,
                    }
                }
                fn values_mut(data: &mut ColumnData) -> Option<&mut ColumnValues<$rust>> {
                    match data {
                        ColumnData::$variant(v) => Some(v),
                        _ => None,
                    }
                }
                #[inline]
                fn into_native(self) -> $rust {
                    self
                }
                #[inline]
                fn from_native(native: &$rust) -> Self {
                    native.clone()
                }
            }
        )*
    };
}

impl_dyn_value_identity!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f16 => Float16,
    f32 => Float32,
    f64 => Float64,
    String => Utf8,
    Vec<u8> => Binary,
    Uuid => Uuid,
);

impl DynValue for Date {
    type Native = i32;
    fn values(data: &ColumnData) -> Option<&ColumnValues<i32>> {
        match data {
            ColumnData::Date(v) => Some(v),
            _ => None,
        }
    }
    fn values_mut(data: &mut ColumnData) -> Option<&mut ColumnValues<i32>> {
        match data {
            ColumnData::Date(v) => Some(v),
            _ => None,
        }
    }
    fn into_native(self) -> i32 {
        self.0
    }
    fn from_native(native: &i32) -> Self {
        Date(*native)
    }
}

impl<S: DecimalStorage> DynValue for Decimal<S> {
    type Native = i128;
    fn values(data: &ColumnData) -> Option<&ColumnValues<i128>> {
        match data {
            ColumnData::Decimal(v) => Some(v),
            _ => None,
        }
    }
    fn values_mut(data: &mut ColumnData) -> Option<&mut ColumnValues<i128>> {
        match data {
            ColumnData::Decimal(v) => Some(v),
            _ => None,
        }
    }
    fn into_native(self) -> i128 {
        self.value()
    }
    fn from_native(native: &i128) -> Self {
        Decimal::new(*native)
    }
}

impl<U: TimeStorage> DynValue for Time<U> {
    type Native = i64;
    fn values(data: &ColumnData) -> Option<&ColumnValues<i64>> {
        match data {
            ColumnData::Time { unit, values, .. } if *unit == U::UNIT => Some(values),
            _ => None,
        }
    }
    fn values_mut(data: &mut ColumnData) -> Option<&mut ColumnValues<i64>> {
        match data {
            ColumnData::Time { unit, values, .. } if *unit == U::UNIT => Some(values),
            _ => None,
        }
    }
    fn into_native(self) -> i64 {
        self.0
    }
    fn from_native(native: &i64) -> Self {
        Time::new(*native)
    }
}

impl<U: TimeUnitSpec> DynValue for Timestamp<U> {
    type Native = i64;
    fn values(data: &ColumnData) -> Option<&ColumnValues<i64>> {
        match data {
            ColumnData::Timestamp { unit, values, .. } if *unit == U::UNIT => Some(values),
            _ => None,
        }
    }
    fn values_mut(data: &mut ColumnData) -> Option<&mut ColumnValues<i64>> {
        match data {
            ColumnData::Timestamp { unit, values, .. } if *unit == U::UNIT => Some(values),
            _ => None,
        }
    }
    fn into_native(self) -> i64 {
        self.0
    }
    fn from_native(native: &i64) -> Self {
        Timestamp::new(*native)
    }
}

/// Operation run against a typed column reader once its element shape is known.
pub trait ReaderVisitor {
    /// Result of the visit.
    type Output;

    /// Run against the concrete reader.
    ///
    /// # Errors
    /// Implementation-defined.
    fn visit<E>(self, reader: &mut LogicalColumnReader<E>) -> Result<Self::Output, DynError>
    where
        E: LogicalElement,
        E::Value: DynValue;
}

/// Operation run against a typed column writer once its element shape is known.
pub trait WriterVisitor {
    /// Result of the visit.
    type Output;

    /// Run against the concrete writer.
    ///
    /// # Errors
    /// Implementation-defined.
    fn visit<E>(self, writer: &mut LogicalColumnWriter<'_, E>) -> Result<Self::Output, DynError>
    where
        E: LogicalElement,
        E::Value: DynValue;
}

macro_rules! logical_streams {
    ($( $shape:ident, $nullable:ident => $elem:ty ),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Shape {
            $( $shape, )*
        }

        /// Column reader tagged with its element shape.
        pub enum LogicalReader {
            $(
                #[doc = concat!("Required `", stringify!($elem), "` elements.")]
                $shape(LogicalColumnReader<$elem>),
                #[doc = concat!("Nullable `", stringify!($elem), "` elements.")]
                $nullable(LogicalColumnReader<Option<$elem>>),
            )*
        }

        impl LogicalReader {
            fn from_shape(
                shape: Shape,
                nullable: bool,
                reader: ColumnReader,
                descr: ColumnDescPtr,
                num_rows: usize,
                buffer_length: usize,
            ) -> Result<Self, DynError> {
                Ok(match (shape, nullable) {
                    $(
                        (Shape::$shape, false) => Self::$shape(LogicalColumnReader::try_new(
                            reader, descr, num_rows, buffer_length,
                        )?),
                        (Shape::$shape, true) => Self::$nullable(LogicalColumnReader::try_new(
                            reader, descr, num_rows, buffer_length,
                        )?),
                    )*
                })
            }

            /// Run `visitor` against the typed reader.
            ///
            /// # Errors
            /// Propagates the visitor's error.
            pub fn accept<V: ReaderVisitor>(&mut self, visitor: V) -> Result<V::Output, DynError> {
                match self {
                    $(
                        Self::$shape(r) => visitor.visit(r),
                        Self::$nullable(r) => visitor.visit(r),
                    )*
                }
            }

            /// Element type the column decodes to.
            pub fn element_type(&self) -> &ElementType {
                match self {
                    $(
                        Self::$shape(r) => r.element_type(),
                        Self::$nullable(r) => r.element_type(),
                    )*
                }
            }
        }

        /// Column writer tagged with its element shape.
        pub enum LogicalWriter<'a> {
            $(
                #[doc = concat!("Required `", stringify!($elem), "` elements.")]
                $shape(LogicalColumnWriter<'a, $elem>),
                #[doc = concat!("Nullable `", stringify!($elem), "` elements.")]
                $nullable(LogicalColumnWriter<'a, Option<$elem>>),
            )*
        }

        impl<'a> LogicalWriter<'a> {
            fn from_shape(
                shape: Shape,
                nullable: bool,
                writer: SerializedColumnWriter<'a>,
            ) -> Result<Self, DynError> {
                Ok(match (shape, nullable) {
                    $(
                        (Shape::$shape, false) => {
                            Self::$shape(LogicalColumnWriter::try_new(writer)?)
                        }
                        (Shape::$shape, true) => {
                            Self::$nullable(LogicalColumnWriter::try_new(writer)?)
                        }
                    )*
                })
            }

            /// Run `visitor` against the typed writer.
            ///
            /// # Errors
            /// Propagates the visitor's error.
            pub fn accept<V: WriterVisitor>(&mut self, visitor: V) -> Result<V::Output, DynError> {
                match self {
                    $(
                        Self::$shape(w) => visitor.visit(w),
                        Self::$nullable(w) => visitor.visit(w),
                    )*
                }
            }

            /// Flush and close the column chunk.
            ///
            /// # Errors
            /// Propagates errors from the underlying writer.
            pub fn close(self) -> Result<(), DynError> {
                match self {
                    $(
                        Self::$shape(w) => w.close()?,
                        Self::$nullable(w) => w.close()?,
                    )*
                }
                Ok(())
            }
        }
    };
}

logical_streams! {
    Bool, BoolNullable => bool,
    Int8, Int8Nullable => i8,
    Int16, Int16Nullable => i16,
    Int32, Int32Nullable => i32,
    Int64, Int64Nullable => i64,
    UInt8, UInt8Nullable => u8,
    UInt16, UInt16Nullable => u16,
    UInt32, UInt32Nullable => u32,
    UInt64, UInt64Nullable => u64,
    Float16, Float16Nullable => f16,
    Float32, Float32Nullable => f32,
    Float64, Float64Nullable => f64,
    Utf8, Utf8Nullable => String,
    Binary, BinaryNullable => Vec<u8>,
    DecimalFixed, DecimalFixedNullable => Decimal<DecimalFixed>,
    DecimalBytes, DecimalBytesNullable => Decimal<DecimalBytes>,
    DecimalInt32, DecimalInt32Nullable => Decimal<DecimalInt32>,
    DecimalInt64, DecimalInt64Nullable => Decimal<DecimalInt64>,
    Date, DateNullable => Date,
    TimeMillis, TimeMillisNullable => Time<Millisecond>,
    TimeMicros, TimeMicrosNullable => Time<Microsecond>,
    TimeNanos, TimeNanosNullable => Time<Nanosecond>,
    TimestampMillis, TimestampMillisNullable => Timestamp<Millisecond>,
    TimestampMicros, TimestampMicrosNullable => Timestamp<Microsecond>,
    TimestampNanos, TimestampNanosNullable => Timestamp<Nanosecond>,
    Uuid, UuidNullable => Uuid,
}

impl Shape {
    fn for_element(
        column: &str,
        element: &ElementType,
        physical: PhysicalType,
    ) -> Result<Self, DynError> {
        Ok(match *element {
            ElementType::Bool => Shape::Bool,
            ElementType::Int8 => Shape::Int8,
            ElementType::Int16 => Shape::Int16,
            ElementType::Int32 => Shape::Int32,
            ElementType::Int64 => Shape::Int64,
            ElementType::UInt8 => Shape::UInt8,
            ElementType::UInt16 => Shape::UInt16,
            ElementType::UInt32 => Shape::UInt32,
            ElementType::UInt64 => Shape::UInt64,
            ElementType::Float16 => Shape::Float16,
            ElementType::Float32 => Shape::Float32,
            ElementType::Float64 => Shape::Float64,
            ElementType::Utf8 => Shape::Utf8,
            ElementType::Binary => Shape::Binary,
            ElementType::Decimal { .. } => match physical {
                PhysicalType::FIXED_LEN_BYTE_ARRAY => Shape::DecimalFixed,
                PhysicalType::BYTE_ARRAY => Shape::DecimalBytes,
                PhysicalType::INT32 => Shape::DecimalInt32,
                PhysicalType::INT64 => Shape::DecimalInt64,
                other => {
                    return Err(DynError::UnsupportedType {
                        column: column.to_string(),
                        descriptor: format!("{element} stored as {other}"),
                    });
                }
            },
            ElementType::Date => Shape::Date,
            ElementType::Time { unit, .. } => match unit {
                TimeUnit::Millis => Shape::TimeMillis,
                TimeUnit::Micros => Shape::TimeMicros,
                TimeUnit::Nanos => Shape::TimeNanos,
            },
            ElementType::Timestamp { unit, .. } => match unit {
                TimeUnit::Millis => Shape::TimestampMillis,
                TimeUnit::Micros => Shape::TimestampMicros,
                TimeUnit::Nanos => Shape::TimestampNanos,
            },
            ElementType::Uuid => Shape::Uuid,
        })
    }

    // Writes follow the backing kind: overrides change annotations, never the values.
    fn for_kind(kind: &ColumnKind) -> Self {
        match *kind {
            ColumnKind::Bool => Shape::Bool,
            ColumnKind::Int8 => Shape::Int8,
            ColumnKind::Int16 => Shape::Int16,
            ColumnKind::Int32 => Shape::Int32,
            ColumnKind::Int64 => Shape::Int64,
            ColumnKind::UInt8 => Shape::UInt8,
            ColumnKind::UInt16 => Shape::UInt16,
            ColumnKind::UInt32 => Shape::UInt32,
            ColumnKind::UInt64 => Shape::UInt64,
            ColumnKind::Float16 => Shape::Float16,
            ColumnKind::Float32 => Shape::Float32,
            ColumnKind::Float64 => Shape::Float64,
            ColumnKind::Utf8 => Shape::Utf8,
            ColumnKind::Binary => Shape::Binary,
            ColumnKind::Decimal => Shape::DecimalFixed,
            ColumnKind::Date => Shape::Date,
            ColumnKind::Time { unit, .. } => match unit {
                TimeUnit::Millis => Shape::TimeMillis,
                TimeUnit::Micros => Shape::TimeMicros,
                TimeUnit::Nanos => Shape::TimeNanos,
            },
            ColumnKind::Timestamp { unit, .. } => match unit {
                TimeUnit::Millis => Shape::TimestampMillis,
                TimeUnit::Micros => Shape::TimestampMicros,
                TimeUnit::Nanos => Shape::TimestampNanos,
            },
            ColumnKind::Uuid => Shape::Uuid,
        }
    }
}

impl LogicalReader {
    /// Recover the element type of a file column and wrap its physical reader.
    ///
    /// This is the only place a column's type is decided on the read path.
    ///
    /// # Errors
    /// Returns [`DynError::UnsupportedType`] when the descriptor is outside the
    /// catalogue.
    pub fn try_new(
        reader: ColumnReader,
        descr: ColumnDescPtr,
        num_rows: usize,
        buffer_length: usize,
    ) -> Result<Self, DynError> {
        let (element, nullable) = resolve_column(&descr)?;
        let shape = Shape::for_element(descr.name(), &element, descr.physical_type())?;
        tracing::trace!(
            column = descr.name(),
            element = %element,
            nullable,
            num_rows,
            "opening column reader"
        );
        Self::from_shape(shape, nullable, reader, descr, num_rows, buffer_length)
    }
}

impl<'a> LogicalWriter<'a> {
    /// Wrap the next column writer of a row group for a column of `kind`.
    ///
    /// # Errors
    /// Returns [`DynError::Typed`] when the file column's physical type does not
    /// match the kind.
    pub fn try_new(
        writer: SerializedColumnWriter<'a>,
        kind: &ColumnKind,
        nullable: bool,
    ) -> Result<Self, DynError> {
        tracing::trace!(kind = %kind, nullable, "opening column writer");
        Self::from_shape(Shape::for_kind(kind), nullable, writer)
    }
}
