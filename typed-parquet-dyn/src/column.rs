//! Dynamic columns: backing kinds, typed storage and named columns.

use std::fmt;

use half::f16;
use parquet::basic::LogicalType;
use typed_parquet::schema::{ElementType, StorageType, TimeUnit};
use uuid::Uuid;

use crate::{values::ColumnValues, DynCell, DynError};

/// Backing type of a dynamic column, fixed at construction.
///
/// This mirrors [`ElementType`] except that decimals carry no precision or scale:
/// a column only stores unscaled integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnKind {
    /// `bool` values.
    Bool,
    /// `i8` values.
    Int8,
    /// `i16` values.
    Int16,
    /// `i32` values.
    Int32,
    /// `i64` values.
    Int64,
    /// `u8` values.
    UInt8,
    /// `u16` values.
    UInt16,
    /// `u32` values.
    UInt32,
    /// `u64` values.
    UInt64,
    /// `f16` values.
    Float16,
    /// `f32` values.
    Float32,
    /// `f64` values.
    Float64,
    /// `String` values.
    Utf8,
    /// `Vec<u8>` values.
    Binary,
    /// Unscaled `i128` decimals.
    Decimal,
    /// Days since the UNIX epoch as `i32`.
    Date,
    /// Time of day as `i64` units.
    Time {
        /// Resolution of the values.
        unit: TimeUnit,
        /// Whether the values are adjusted to UTC.
        utc_adjusted: bool,
    },
    /// Instant as `i64` units since the UNIX epoch.
    Timestamp {
        /// Resolution of the values.
        unit: TimeUnit,
        /// Whether the values are adjusted to UTC.
        utc_adjusted: bool,
    },
    /// `Uuid` values.
    Uuid,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Time { unit, .. } => write!(f, "Time({unit})"),
            ColumnKind::Timestamp { unit, .. } => write!(f, "Timestamp({unit})"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl ColumnKind {
    /// Backing kind used to hold values of an element type.
    pub fn of(element: &ElementType) -> Self {
        match *element {
            ElementType::Bool => ColumnKind::Bool,
            ElementType::Int8 => ColumnKind::Int8,
            ElementType::Int16 => ColumnKind::Int16,
            ElementType::Int32 => ColumnKind::Int32,
            ElementType::Int64 => ColumnKind::Int64,
            ElementType::UInt8 => ColumnKind::UInt8,
            ElementType::UInt16 => ColumnKind::UInt16,
            ElementType::UInt32 => ColumnKind::UInt32,
            ElementType::UInt64 => ColumnKind::UInt64,
            ElementType::Float16 => ColumnKind::Float16,
            ElementType::Float32 => ColumnKind::Float32,
            ElementType::Float64 => ColumnKind::Float64,
            ElementType::Utf8 => ColumnKind::Utf8,
            ElementType::Binary => ColumnKind::Binary,
            ElementType::Decimal { .. } => ColumnKind::Decimal,
            ElementType::Date => ColumnKind::Date,
            ElementType::Time { unit, utc_adjusted } => ColumnKind::Time { unit, utc_adjusted },
            ElementType::Timestamp { unit, utc_adjusted } => {
                ColumnKind::Timestamp { unit, utc_adjusted }
            }
            ElementType::Uuid => ColumnKind::Uuid,
        }
    }

    /// Element type written for this kind when no override applies. `None` for
    /// decimals, whose precision and scale must come from an override.
    pub fn element_type(&self) -> Option<ElementType> {
        Some(match *self {
            ColumnKind::Bool => ElementType::Bool,
            ColumnKind::Int8 => ElementType::Int8,
            ColumnKind::Int16 => ElementType::Int16,
            ColumnKind::Int32 => ElementType::Int32,
            ColumnKind::Int64 => ElementType::Int64,
            ColumnKind::UInt8 => ElementType::UInt8,
            ColumnKind::UInt16 => ElementType::UInt16,
            ColumnKind::UInt32 => ElementType::UInt32,
            ColumnKind::UInt64 => ElementType::UInt64,
            ColumnKind::Float16 => ElementType::Float16,
            ColumnKind::Float32 => ElementType::Float32,
            ColumnKind::Float64 => ElementType::Float64,
            ColumnKind::Utf8 => ElementType::Utf8,
            ColumnKind::Binary => ElementType::Binary,
            ColumnKind::Decimal => return None,
            ColumnKind::Date => ElementType::Date,
            ColumnKind::Time { unit, utc_adjusted } => ElementType::Time { unit, utc_adjusted },
            ColumnKind::Timestamp { unit, utc_adjusted } => {
                ElementType::Timestamp { unit, utc_adjusted }
            }
            ColumnKind::Uuid => ElementType::Uuid,
        })
    }

    /// Resolve the storage descriptor a column of this kind is written with.
    ///
    /// # Errors
    /// Returns [`DynError::Configuration`] for a decimal without a `DECIMAL` override
    /// and for overrides the physical type cannot carry.
    pub fn storage_type(
        &self,
        column: &str,
        logical_override: Option<&LogicalType>,
    ) -> Result<StorageType, DynError> {
        let storage = match self.element_type() {
            Some(element) => StorageType::for_element(column, &element, logical_override)?,
            None => StorageType::for_decimal(column, logical_override)?,
        };
        Ok(storage)
    }
}

macro_rules! column_data {
    ($( $(#[$doc:meta])* $variant:ident($native:ty) => $cell:ident ),* $(,)?) => {
        /// Typed storage of a dynamic column, one variant per backing kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum ColumnData {
            $( $(#[$doc])* $variant(ColumnValues<$native>), )*
            /// Time of day values.
            Time {
                /// Resolution of the values.
                unit: TimeUnit,
                /// Whether the values are adjusted to UTC.
                utc_adjusted: bool,
                /// Counts of `unit` since midnight.
                values: ColumnValues<i64>,
            },
            /// Instant values.
            Timestamp {
                /// Resolution of the values.
                unit: TimeUnit,
                /// Whether the values are adjusted to UTC.
                utc_adjusted: bool,
                /// Counts of `unit` since the UNIX epoch.
                values: ColumnValues<i64>,
            },
        }

        impl ColumnData {
            /// Allocate `len` null slots of the given kind.
            pub fn new_null(kind: &ColumnKind, len: usize) -> Self {
                match *kind {
                    $( ColumnKind::$variant => ColumnData::$variant(ColumnValues::new_null(len)), )*
                    ColumnKind::Time { unit, utc_adjusted } => ColumnData::Time {
                        unit,
                        utc_adjusted,
                        values: ColumnValues::new_null(len),
                    },
                    ColumnKind::Timestamp { unit, utc_adjusted } => ColumnData::Timestamp {
                        unit,
                        utc_adjusted,
                        values: ColumnValues::new_null(len),
                    },
                }
            }

            /// Backing kind of this storage.
            pub fn kind(&self) -> ColumnKind {
                match *self {
                    $( ColumnData::$variant(_) => ColumnKind::$variant, )*
                    ColumnData::Time { unit, utc_adjusted, .. } => {
                        ColumnKind::Time { unit, utc_adjusted }
                    }
                    ColumnData::Timestamp { unit, utc_adjusted, .. } => {
                        ColumnKind::Timestamp { unit, utc_adjusted }
                    }
                }
            }

            /// Number of rows.
            pub fn len(&self) -> usize {
                match self {
                    $( ColumnData::$variant(v) => v.len(), )*
                    ColumnData::Time { values, .. } | ColumnData::Timestamp { values, .. } => {
                        values.len()
                    }
                }
            }

            /// Whether there are no rows.
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Number of null rows.
            pub fn null_count(&self) -> usize {
                match self {
                    $( ColumnData::$variant(v) => v.null_count(), )*
                    ColumnData::Time { values, .. } | ColumnData::Timestamp { values, .. } => {
                        values.null_count()
                    }
                }
            }

            /// Read row `index` as a cell.
            ///
            /// # Errors
            /// Returns [`DynError::OutOfBounds`] when `index >= len`.
            pub fn get_cell(&self, index: usize) -> Result<DynCell, DynError> {
                Ok(match self {
                    $( ColumnData::$variant(v) => {
                        v.get(index)?.map_or(DynCell::Null, |x| DynCell::$cell(x.clone()))
                    } )*
                    ColumnData::Time { values, .. } => {
                        values.get(index)?.map_or(DynCell::Null, |x| DynCell::Time(*x))
                    }
                    ColumnData::Timestamp { values, .. } => {
                        values.get(index)?.map_or(DynCell::Null, |x| DynCell::Timestamp(*x))
                    }
                })
            }

            /// Overwrite row `index` with a cell. `column` names the column in errors.
            ///
            /// # Errors
            /// Returns [`DynError::TypeMismatch`] when the cell does not match the
            /// backing kind and [`DynError::OutOfBounds`] when `index >= len`.
            pub fn set_cell(
                &mut self,
                column: &str,
                index: usize,
                cell: DynCell,
            ) -> Result<(), DynError> {
                match (self, cell) {
                    $(
                        (ColumnData::$variant(v), DynCell::Null) => v.set(index, None),
                        (ColumnData::$variant(v), DynCell::$cell(x)) => v.set(index, Some(x)),
                    )*
                    (ColumnData::Time { values, .. }, DynCell::Null)
                    | (ColumnData::Timestamp { values, .. }, DynCell::Null) => {
                        values.set(index, None)
                    }
                    (ColumnData::Time { values, .. }, DynCell::Time(x))
                    | (ColumnData::Timestamp { values, .. }, DynCell::Timestamp(x)) => {
                        values.set(index, Some(x))
                    }
                    (data, cell) => Err(DynError::type_mismatch(
                        column,
                        data.kind(),
                        cell.type_name(),
                    )),
                }
            }
        }
    };
}

column_data! {
    /// `bool` values.
    Bool(bool) => Bool,
    /// `i8` values.
    Int8(i8) => I8,
    /// `i16` values.
    Int16(i16) => I16,
    /// `i32` values.
    Int32(i32) => I32,
    /// `i64` values.
    Int64(i64) => I64,
    /// `u8` values.
    UInt8(u8) => U8,
    /// `u16` values.
    UInt16(u16) => U16,
    /// `u32` values.
    UInt32(u32) => U32,
    /// `u64` values.
    UInt64(u64) => U64,
    /// `f16` values.
    Float16(f16) => F16,
    /// `f32` values.
    Float32(f32) => F32,
    /// `f64` values.
    Float64(f64) => F64,
    /// UTF-8 strings.
    Utf8(String) => Str,
    /// Byte strings.
    Binary(Vec<u8>) => Bin,
    /// Unscaled decimals.
    Decimal(i128) => Decimal,
    /// Days since the UNIX epoch.
    Date(i32) => Date,
    /// UUIDs.
    Uuid(Uuid) => Uuid,
}

/// A named, fixed-length, nullable column.
#[derive(Debug, Clone, PartialEq)]
pub struct DynColumn {
    name: String,
    data: ColumnData,
}

impl DynColumn {
    /// Create a column from existing storage.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create a column of `len` null rows.
    pub fn new_null(name: impl Into<String>, kind: &ColumnKind, len: usize) -> Self {
        Self::new(name, ColumnData::new_null(kind, len))
    }

    /// Column name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Typed storage.
    #[inline]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Mutable typed storage.
    #[inline]
    pub fn data_mut(&mut self) -> &mut ColumnData {
        &mut self.data
    }

    /// Consume the column, returning its storage.
    pub fn into_data(self) -> ColumnData {
        self.data
    }

    /// Backing kind.
    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of null rows.
    pub fn null_count(&self) -> usize {
        self.data.null_count()
    }

    /// Read row `index`.
    ///
    /// # Errors
    /// Returns [`DynError::OutOfBounds`] when `index >= len`.
    pub fn get(&self, index: usize) -> Result<DynCell, DynError> {
        self.data.get_cell(index)
    }

    /// Overwrite row `index`.
    ///
    /// # Errors
    /// Returns [`DynError::TypeMismatch`] when the cell does not match the backing kind
    /// and [`DynError::OutOfBounds`] when `index >= len`.
    pub fn set(&mut self, index: usize, cell: DynCell) -> Result<(), DynError> {
        self.data.set_cell(&self.name, index, cell)
    }
}
