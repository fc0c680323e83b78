//! Dynamic cell values read from and written into dynamic columns.
//!
//! Notes on mapping to column kinds:
//! - `Decimal` carries the unscaled integer; precision and scale belong to the file
//!   column or the write override.
//! - `Time` and `Timestamp` carry a count of the column's unit; the unit is a property
//!   of the column, not the cell.

use half::f16;
use uuid::Uuid;

/// A dynamic cell addressed by row in a [`DynColumn`](crate::DynColumn).
#[derive(Debug, Clone, PartialEq)]
pub enum DynCell {
    /// Absent value.
    Null,
    /// Boolean value for `ColumnKind::Bool`.
    Bool(bool),
    /// 8-bit signed integer for `ColumnKind::Int8`.
    I8(i8),
    /// 16-bit signed integer for `ColumnKind::Int16`.
    I16(i16),
    /// 32-bit signed integer for `ColumnKind::Int32`.
    I32(i32),
    /// 64-bit signed integer for `ColumnKind::Int64`.
    I64(i64),
    /// 8-bit unsigned integer for `ColumnKind::UInt8`.
    U8(u8),
    /// 16-bit unsigned integer for `ColumnKind::UInt16`.
    U16(u16),
    /// 32-bit unsigned integer for `ColumnKind::UInt32`.
    U32(u32),
    /// 64-bit unsigned integer for `ColumnKind::UInt64`.
    U64(u64),
    /// Half-precision float for `ColumnKind::Float16`.
    F16(f16),
    /// 32-bit floating point for `ColumnKind::Float32`.
    F32(f32),
    /// 64-bit floating point for `ColumnKind::Float64`.
    F64(f64),
    /// UTF-8 string for `ColumnKind::Utf8`.
    Str(String),
    /// Arbitrary bytes for `ColumnKind::Binary`.
    Bin(Vec<u8>),
    /// Unscaled decimal for `ColumnKind::Decimal`.
    Decimal(i128),
    /// Days since the UNIX epoch for `ColumnKind::Date`.
    Date(i32),
    /// Time of day in the column's unit for `ColumnKind::Time`.
    Time(i64),
    /// Instant in the column's unit for `ColumnKind::Timestamp`.
    Timestamp(i64),
    /// UUID for `ColumnKind::Uuid`.
    Uuid(Uuid),
}

impl DynCell {
    /// Whether this cell is [`DynCell::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DynCell::Null)
    }

    /// Name of the variant, used in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            DynCell::Null => "Null",
            DynCell::Bool(_) => "Bool",
            DynCell::I8(_) => "I8",
            DynCell::I16(_) => "I16",
            DynCell::I32(_) => "I32",
            DynCell::I64(_) => "I64",
            DynCell::U8(_) => "U8",
            DynCell::U16(_) => "U16",
            DynCell::U32(_) => "U32",
            DynCell::U64(_) => "U64",
            DynCell::F16(_) => "F16",
            DynCell::F32(_) => "F32",
            DynCell::F64(_) => "F64",
            DynCell::Str(_) => "Str",
            DynCell::Bin(_) => "Bin",
            DynCell::Decimal(_) => "Decimal",
            DynCell::Date(_) => "Date",
            DynCell::Time(_) => "Time",
            DynCell::Timestamp(_) => "Timestamp",
            DynCell::Uuid(_) => "Uuid",
        }
    }
}
