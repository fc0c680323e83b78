//! Type catalogue: element types and their mapping to Parquet storage descriptors.
//!
//! Reading resolves a column's [`StorageType`] to exactly one [`ElementType`] via
//! [`StorageType::element_type`]. Writing goes the other way with
//! [`StorageType::for_element`], optionally replacing the logical annotation with a
//! caller override. Decimals are the one ambiguous case: their precision and scale
//! cannot be recovered from an in-memory scaled integer, so
//! [`StorageType::for_decimal`] insists on an explicit `DECIMAL` override.

use std::fmt;

use parquet::{
    basic::{
        ConvertedType, LogicalType, Repetition, TimeUnit as ParquetTimeUnit, Type as PhysicalType,
    },
    schema::types::{ColumnDescriptor, Type, TypePtr},
};

use crate::error::{Error, Result};

/// Maximum decimal precision representable by the 128-bit in-memory decimal.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// Byte width used when writing decimals as `FIXED_LEN_BYTE_ARRAY`.
pub const DECIMAL_BYTE_WIDTH: i32 = 16;

/// Byte width of a UUID value.
pub const UUID_BYTE_WIDTH: i32 = 16;

/// Byte width of a half-precision float.
pub const FLOAT16_BYTE_WIDTH: i32 = 2;

/// Resolution of a temporal element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    /// Milliseconds.
    Millis,
    /// Microseconds.
    Micros,
    /// Nanoseconds.
    Nanos,
}

impl TimeUnit {
    /// The Parquet annotation unit for this resolution.
    pub fn to_parquet(self) -> ParquetTimeUnit {
        match self {
            TimeUnit::Millis => ParquetTimeUnit::MILLIS,
            TimeUnit::Micros => ParquetTimeUnit::MICROS,
            TimeUnit::Nanos => ParquetTimeUnit::NANOS,
        }
    }

    fn from_parquet(unit: &ParquetTimeUnit) -> Self {
        match unit {
            ParquetTimeUnit::MILLIS => TimeUnit::Millis,
            ParquetTimeUnit::MICROS => TimeUnit::Micros,
            ParquetTimeUnit::NANOS => TimeUnit::Nanos,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Millis => "ms",
            TimeUnit::Micros => "us",
            TimeUnit::Nanos => "ns",
        })
    }
}

/// One concrete value kind in the closed catalogue.
///
/// Nullability is not part of the element type; it is a property of the column
/// (Parquet `OPTIONAL` repetition) and surfaces as `Option<T>` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementType {
    /// Boolean.
    Bool,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    UInt8,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer.
    UInt64,
    /// IEEE half-precision float.
    Float16,
    /// IEEE single-precision float.
    Float32,
    /// IEEE double-precision float.
    Float64,
    /// UTF-8 string.
    Utf8,
    /// Opaque byte string.
    Binary,
    /// Fixed-point decimal stored as a scaled integer.
    Decimal {
        /// Total number of significant digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: i8,
    },
    /// Days since the UNIX epoch.
    Date,
    /// Time of day since midnight.
    Time {
        /// Resolution of the stored value.
        unit: TimeUnit,
        /// Whether the value is adjusted to UTC.
        utc_adjusted: bool,
    },
    /// Instant since the UNIX epoch.
    Timestamp {
        /// Resolution of the stored value.
        unit: TimeUnit,
        /// Whether the value is adjusted to UTC.
        utc_adjusted: bool,
    },
    /// 128-bit UUID.
    Uuid,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Decimal { precision, scale } => write!(f, "Decimal({precision}, {scale})"),
            ElementType::Time { unit, utc_adjusted } => {
                write!(f, "Time({unit}, utc={utc_adjusted})")
            }
            ElementType::Timestamp { unit, utc_adjusted } => {
                write!(f, "Timestamp({unit}, utc={utc_adjusted})")
            }
            other => write!(f, "{other:?}"),
        }
    }
}

/// Storage descriptor: a Parquet physical type plus its annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageType {
    /// Physical representation on disk.
    pub physical: PhysicalType,
    /// Logical annotation, if any.
    pub logical: Option<LogicalType>,
    /// Legacy converted-type annotation.
    pub converted: ConvertedType,
    /// Byte width for `FIXED_LEN_BYTE_ARRAY`, `-1` otherwise.
    pub length: i32,
    /// Decimal precision, `-1` when not a decimal.
    pub precision: i32,
    /// Decimal scale, `-1` when not a decimal.
    pub scale: i32,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.physical)?;
        if self.physical == PhysicalType::FIXED_LEN_BYTE_ARRAY {
            write!(f, "({})", self.length)?;
        }
        match &self.logical {
            Some(logical) => write!(f, " {logical:?}"),
            None if self.converted != ConvertedType::NONE => write!(f, " {}", self.converted),
            None => Ok(()),
        }
    }
}

impl StorageType {
    fn new(physical: PhysicalType, logical: Option<LogicalType>) -> Self {
        Self {
            physical,
            logical,
            converted: ConvertedType::NONE,
            length: -1,
            precision: -1,
            scale: -1,
        }
    }

    fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    /// Capture the storage descriptor of a file column.
    pub fn of(descr: &ColumnDescriptor) -> Self {
        Self {
            physical: descr.physical_type(),
            logical: descr.logical_type_ref().cloned(),
            converted: descr.converted_type(),
            length: descr.type_length(),
            precision: descr.type_precision(),
            scale: descr.type_scale(),
        }
    }

    /// Resolve the element type this descriptor decodes to.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedType`] when the descriptor is outside the catalogue.
    pub fn element_type(&self, column: &str) -> Result<ElementType> {
        let unsupported = || Error::unsupported(column, self.to_string());
        let element = match (self.physical, &self.logical) {
            (PhysicalType::BOOLEAN, None) => ElementType::Bool,
            (PhysicalType::FLOAT, None) => ElementType::Float32,
            (PhysicalType::DOUBLE, None) => ElementType::Float64,

            (PhysicalType::INT32, None) => match self.converted {
                ConvertedType::NONE | ConvertedType::INT_32 => ElementType::Int32,
                ConvertedType::INT_8 => ElementType::Int8,
                ConvertedType::INT_16 => ElementType::Int16,
                ConvertedType::UINT_8 => ElementType::UInt8,
                ConvertedType::UINT_16 => ElementType::UInt16,
                ConvertedType::UINT_32 => ElementType::UInt32,
                ConvertedType::DATE => ElementType::Date,
                ConvertedType::TIME_MILLIS => ElementType::Time {
                    unit: TimeUnit::Millis,
                    utc_adjusted: true,
                },
                ConvertedType::DECIMAL => self.decimal(column)?,
                _ => return Err(unsupported()),
            },
            (
                PhysicalType::INT32,
                Some(LogicalType::Integer {
                    bit_width,
                    is_signed,
                }),
            ) => match (bit_width, is_signed) {
                (8, true) => ElementType::Int8,
                (16, true) => ElementType::Int16,
                (32, true) => ElementType::Int32,
                (8, false) => ElementType::UInt8,
                (16, false) => ElementType::UInt16,
                (32, false) => ElementType::UInt32,
                _ => return Err(unsupported()),
            },
            (PhysicalType::INT32, Some(LogicalType::Date)) => ElementType::Date,
            (
                PhysicalType::INT32,
                Some(LogicalType::Time {
                    is_adjusted_to_u_t_c,
                    unit: ParquetTimeUnit::MILLIS,
                }),
            ) => ElementType::Time {
                unit: TimeUnit::Millis,
                utc_adjusted: *is_adjusted_to_u_t_c,
            },

            (PhysicalType::INT64, None) => match self.converted {
                ConvertedType::NONE | ConvertedType::INT_64 => ElementType::Int64,
                ConvertedType::UINT_64 => ElementType::UInt64,
                ConvertedType::TIME_MICROS => ElementType::Time {
                    unit: TimeUnit::Micros,
                    utc_adjusted: true,
                },
                ConvertedType::TIMESTAMP_MILLIS => ElementType::Timestamp {
                    unit: TimeUnit::Millis,
                    utc_adjusted: true,
                },
                ConvertedType::TIMESTAMP_MICROS => ElementType::Timestamp {
                    unit: TimeUnit::Micros,
                    utc_adjusted: true,
                },
                ConvertedType::DECIMAL => self.decimal(column)?,
                _ => return Err(unsupported()),
            },
            (
                PhysicalType::INT64,
                Some(LogicalType::Integer {
                    bit_width: 64,
                    is_signed,
                }),
            ) => {
                if *is_signed {
                    ElementType::Int64
                } else {
                    ElementType::UInt64
                }
            }
            (
                PhysicalType::INT64,
                Some(LogicalType::Time {
                    is_adjusted_to_u_t_c,
                    unit: unit @ (ParquetTimeUnit::MICROS | ParquetTimeUnit::NANOS),
                }),
            ) => ElementType::Time {
                unit: TimeUnit::from_parquet(unit),
                utc_adjusted: *is_adjusted_to_u_t_c,
            },
            (
                PhysicalType::INT64,
                Some(LogicalType::Timestamp {
                    is_adjusted_to_u_t_c,
                    unit,
                }),
            ) => ElementType::Timestamp {
                unit: TimeUnit::from_parquet(unit),
                utc_adjusted: *is_adjusted_to_u_t_c,
            },

            (PhysicalType::BYTE_ARRAY, None) => match self.converted {
                ConvertedType::NONE => ElementType::Binary,
                ConvertedType::UTF8 => ElementType::Utf8,
                ConvertedType::DECIMAL => self.decimal(column)?,
                _ => return Err(unsupported()),
            },
            (PhysicalType::BYTE_ARRAY, Some(LogicalType::String)) => ElementType::Utf8,

            (PhysicalType::FIXED_LEN_BYTE_ARRAY, Some(LogicalType::Uuid))
                if self.length == UUID_BYTE_WIDTH =>
            {
                ElementType::Uuid
            }
            (PhysicalType::FIXED_LEN_BYTE_ARRAY, Some(LogicalType::Float16))
                if self.length == FLOAT16_BYTE_WIDTH =>
            {
                ElementType::Float16
            }
            (PhysicalType::FIXED_LEN_BYTE_ARRAY, None)
                if self.converted == ConvertedType::DECIMAL =>
            {
                self.decimal(column)?
            }

            (
                PhysicalType::INT32
                | PhysicalType::INT64
                | PhysicalType::BYTE_ARRAY
                | PhysicalType::FIXED_LEN_BYTE_ARRAY,
                Some(LogicalType::Decimal { .. }),
            ) => self.decimal(column)?,

            _ => return Err(unsupported()),
        };
        Ok(element)
    }

    fn decimal(&self, column: &str) -> Result<ElementType> {
        let (precision, scale) = match &self.logical {
            Some(LogicalType::Decimal { precision, scale }) => (*precision, *scale),
            _ => (self.precision, self.scale),
        };
        let precision = u8::try_from(precision)
            .ok()
            .filter(|p| (1..=MAX_DECIMAL_PRECISION).contains(p));
        let scale = i8::try_from(scale).ok();
        match (precision, scale) {
            (Some(precision), Some(scale)) => Ok(ElementType::Decimal { precision, scale }),
            _ => Err(Error::unsupported(column, self.to_string())),
        }
    }

    /// Default storage descriptor for an element type, with an optional logical
    /// annotation override.
    ///
    /// The override replaces the annotation only: the physical type stays the one the
    /// element type is natively written as, so values are passed through unchanged.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when the override cannot annotate the physical
    /// type, or when the annotated descriptor would not decode to an element type.
    pub fn for_element(
        column: &str,
        element: &ElementType,
        logical_override: Option<&LogicalType>,
    ) -> Result<Self> {
        let storage = match element {
            ElementType::Bool => Self::new(PhysicalType::BOOLEAN, None),
            ElementType::Int8 => Self::new(PhysicalType::INT32, Some(integer(8, true))),
            ElementType::Int16 => Self::new(PhysicalType::INT32, Some(integer(16, true))),
            ElementType::Int32 => Self::new(PhysicalType::INT32, None),
            ElementType::Int64 => Self::new(PhysicalType::INT64, None),
            ElementType::UInt8 => Self::new(PhysicalType::INT32, Some(integer(8, false))),
            ElementType::UInt16 => Self::new(PhysicalType::INT32, Some(integer(16, false))),
            ElementType::UInt32 => Self::new(PhysicalType::INT32, Some(integer(32, false))),
            ElementType::UInt64 => Self::new(PhysicalType::INT64, Some(integer(64, false))),
            ElementType::Float16 => Self::new(
                PhysicalType::FIXED_LEN_BYTE_ARRAY,
                Some(LogicalType::Float16),
            )
            .with_length(FLOAT16_BYTE_WIDTH),
            ElementType::Float32 => Self::new(PhysicalType::FLOAT, None),
            ElementType::Float64 => Self::new(PhysicalType::DOUBLE, None),
            ElementType::Utf8 => Self::new(PhysicalType::BYTE_ARRAY, Some(LogicalType::String)),
            ElementType::Binary => Self::new(PhysicalType::BYTE_ARRAY, None),
            ElementType::Decimal { precision, scale } => {
                let mut storage = Self::new(
                    PhysicalType::FIXED_LEN_BYTE_ARRAY,
                    Some(LogicalType::Decimal {
                        scale: i32::from(*scale),
                        precision: i32::from(*precision),
                    }),
                )
                .with_length(DECIMAL_BYTE_WIDTH);
                storage.precision = i32::from(*precision);
                storage.scale = i32::from(*scale);
                storage
            }
            ElementType::Date => Self::new(PhysicalType::INT32, Some(LogicalType::Date)),
            ElementType::Time { unit, utc_adjusted } => {
                let physical = match unit {
                    TimeUnit::Millis => PhysicalType::INT32,
                    TimeUnit::Micros | TimeUnit::Nanos => PhysicalType::INT64,
                };
                Self::new(
                    physical,
                    Some(LogicalType::Time {
                        is_adjusted_to_u_t_c: *utc_adjusted,
                        unit: unit.to_parquet(),
                    }),
                )
            }
            ElementType::Timestamp { unit, utc_adjusted } => Self::new(
                PhysicalType::INT64,
                Some(LogicalType::Timestamp {
                    is_adjusted_to_u_t_c: *utc_adjusted,
                    unit: unit.to_parquet(),
                }),
            ),
            ElementType::Uuid => {
                Self::new(PhysicalType::FIXED_LEN_BYTE_ARRAY, Some(LogicalType::Uuid))
                    .with_length(UUID_BYTE_WIDTH)
            }
        };

        let storage = match logical_override {
            Some(logical) => storage.with_logical(logical.clone()),
            None => storage,
        };
        storage.validate(column)?;
        Ok(storage)
    }

    /// Storage descriptor for a decimal column whose precision and scale are only
    /// known from a caller-supplied `DECIMAL` override.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] when no override is given, when it is not a
    /// `DECIMAL` annotation, or when its precision/scale are out of range.
    pub fn for_decimal(column: &str, logical_override: Option<&LogicalType>) -> Result<Self> {
        match logical_override {
            Some(LogicalType::Decimal { precision, scale }) => {
                let precision = u8::try_from(*precision)
                    .ok()
                    .filter(|p| (1..=MAX_DECIMAL_PRECISION).contains(p))
                    .ok_or_else(|| {
                        Error::configuration(
                            column,
                            format!(
                                "decimal precision {precision} outside 1..={MAX_DECIMAL_PRECISION}"
                            ),
                        )
                    })?;
                let scale = i8::try_from(*scale)
                    .ok()
                    .filter(|s| (0..=precision as i8).contains(s))
                    .ok_or_else(|| {
                        Error::configuration(
                            column,
                            format!("decimal scale {scale} outside 0..={precision}"),
                        )
                    })?;
                Self::for_element(column, &ElementType::Decimal { precision, scale }, None)
            }
            Some(other) => Err(Error::configuration(
                column,
                format!("decimal column requires a DECIMAL logical type, got {other:?}"),
            )),
            None => Err(Error::configuration(
                column,
                "logical type override must be specified for decimal column",
            )),
        }
    }

    fn with_logical(mut self, logical: LogicalType) -> Self {
        (self.precision, self.scale) = match &logical {
            LogicalType::Decimal { precision, scale } => (*precision, *scale),
            _ => (-1, -1),
        };
        self.logical = Some(logical);
        self
    }

    // Every descriptor the writer resolves must decode back through the catalogue.
    fn validate(&self, column: &str) -> Result<()> {
        self.to_parquet_type(column, Repetition::OPTIONAL)
            .map_err(|e| match e {
                Error::Parquet(inner) => Error::configuration(column, inner.to_string()),
                other => other,
            })?;
        self.element_type(column).map_err(|e| match e {
            Error::UnsupportedType { descriptor, .. } => Error::configuration(
                column,
                format!("{descriptor} cannot be read back as a supported element type"),
            ),
            other => other,
        })?;
        Ok(())
    }

    /// Build the Parquet schema node for a column with this storage descriptor.
    ///
    /// # Errors
    /// Propagates schema builder errors (invalid annotation for the physical type).
    pub fn to_parquet_type(&self, name: &str, repetition: Repetition) -> Result<TypePtr> {
        let mut builder = Type::primitive_type_builder(name, self.physical)
            .with_repetition(repetition)
            .with_logical_type(self.logical.clone())
            .with_converted_type(self.converted);
        if self.length > 0 {
            builder = builder.with_length(self.length);
        }
        if self.precision >= 0 {
            builder = builder
                .with_precision(self.precision)
                .with_scale(self.scale);
        }
        Ok(std::sync::Arc::new(builder.build()?))
    }
}

fn integer(bit_width: i8, is_signed: bool) -> LogicalType {
    LogicalType::Integer {
        bit_width,
        is_signed,
    }
}

/// Resolve a file column to its element type and nullability.
///
/// Only flat columns are supported: a repeated or nested leaf is rejected.
///
/// # Errors
/// Returns [`Error::UnsupportedType`] for nested leaves and descriptors outside the
/// catalogue.
pub fn resolve_column(descr: &ColumnDescriptor) -> Result<(ElementType, bool)> {
    let storage = StorageType::of(descr);
    if descr.max_rep_level() > 0 || descr.max_def_level() > 1 || descr.path().parts().len() > 1 {
        return Err(Error::unsupported(
            descr.name(),
            format!("nested column {} ({storage})", descr.path()),
        ));
    }
    let element = storage.element_type(descr.name())?;
    Ok((element, descr.max_def_level() == 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(storage: StorageType) -> Result<ElementType> {
        storage.element_type("c")
    }

    #[test]
    fn integers_default_to_physical_width() {
        assert_eq!(
            decode(StorageType::new(PhysicalType::INT32, None)).unwrap(),
            ElementType::Int32
        );
        assert_eq!(
            decode(StorageType::new(PhysicalType::INT64, None)).unwrap(),
            ElementType::Int64
        );
    }

    #[test]
    fn integer_annotations_pick_sized_types() {
        let cases = [
            (PhysicalType::INT32, 8, true, ElementType::Int8),
            (PhysicalType::INT32, 16, true, ElementType::Int16),
            (PhysicalType::INT32, 8, false, ElementType::UInt8),
            (PhysicalType::INT32, 16, false, ElementType::UInt16),
            (PhysicalType::INT32, 32, false, ElementType::UInt32),
            (PhysicalType::INT64, 64, false, ElementType::UInt64),
            (PhysicalType::INT64, 64, true, ElementType::Int64),
        ];
        for (physical, width, signed, expected) in cases {
            let storage = StorageType::new(physical, Some(integer(width, signed)));
            assert_eq!(decode(storage).unwrap(), expected);
        }
    }

    #[test]
    fn legacy_converted_types_are_honoured() {
        let mut storage = StorageType::new(PhysicalType::INT64, None);
        storage.converted = ConvertedType::TIMESTAMP_MILLIS;
        assert_eq!(
            decode(storage).unwrap(),
            ElementType::Timestamp {
                unit: TimeUnit::Millis,
                utc_adjusted: true
            }
        );

        let mut storage = StorageType::new(PhysicalType::BYTE_ARRAY, None);
        storage.converted = ConvertedType::UTF8;
        assert_eq!(decode(storage).unwrap(), ElementType::Utf8);
    }

    #[test]
    fn time_units_select_distinct_element_types() {
        let micros = StorageType::for_element(
            "t",
            &ElementType::Time {
                unit: TimeUnit::Micros,
                utc_adjusted: true,
            },
            None,
        )
        .unwrap();
        let nanos = StorageType::for_element(
            "t",
            &ElementType::Time {
                unit: TimeUnit::Nanos,
                utc_adjusted: false,
            },
            None,
        )
        .unwrap();
        assert_eq!(micros.physical, PhysicalType::INT64);
        assert_ne!(decode(micros).unwrap(), decode(nanos).unwrap());

        let millis = StorageType::for_element(
            "t",
            &ElementType::Time {
                unit: TimeUnit::Millis,
                utc_adjusted: true,
            },
            None,
        )
        .unwrap();
        assert_eq!(millis.physical, PhysicalType::INT32);
    }

    #[test]
    fn every_element_type_round_trips_through_its_default_storage() {
        let elements = [
            ElementType::Bool,
            ElementType::Int8,
            ElementType::Int16,
            ElementType::Int32,
            ElementType::Int64,
            ElementType::UInt8,
            ElementType::UInt16,
            ElementType::UInt32,
            ElementType::UInt64,
            ElementType::Float16,
            ElementType::Float32,
            ElementType::Float64,
            ElementType::Utf8,
            ElementType::Binary,
            ElementType::Decimal {
                precision: 29,
                scale: 3,
            },
            ElementType::Date,
            ElementType::Time {
                unit: TimeUnit::Millis,
                utc_adjusted: true,
            },
            ElementType::Timestamp {
                unit: TimeUnit::Nanos,
                utc_adjusted: false,
            },
            ElementType::Uuid,
        ];
        for element in elements {
            let storage = StorageType::for_element("c", &element, None).unwrap();
            assert_eq!(decode(storage).unwrap(), element, "{element}");
        }
    }

    #[test]
    fn override_keeps_physical_type() {
        let storage = StorageType::for_element(
            "int_as_byte",
            &ElementType::Int32,
            Some(&integer(8, false)),
        )
        .unwrap();
        assert_eq!(storage.physical, PhysicalType::INT32);
        assert_eq!(decode(storage).unwrap(), ElementType::UInt8);

        let storage =
            StorageType::for_element("int_as_date", &ElementType::Int32, Some(&LogicalType::Date))
                .unwrap();
        assert_eq!(decode(storage).unwrap(), ElementType::Date);
    }

    #[test]
    fn incompatible_override_is_a_configuration_error() {
        let err = StorageType::for_element("s", &ElementType::Utf8, Some(&LogicalType::Date))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { ref column, .. } if column == "s"));
    }

    #[test]
    fn undecodable_override_is_a_configuration_error() {
        for logical in [LogicalType::Json, LogicalType::Enum, LogicalType::Bson] {
            let err = StorageType::for_element("s", &ElementType::Utf8, Some(&logical))
                .unwrap_err();
            assert!(
                matches!(err, Error::Configuration { ref column, .. } if column == "s"),
                "{logical:?}: {err}"
            );
        }
    }

    #[test]
    fn decimal_requires_override() {
        let err = StorageType::for_decimal("price", None).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("price"));

        let err = StorageType::for_decimal("price", Some(&LogicalType::Date)).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let storage = StorageType::for_decimal(
            "price",
            Some(&LogicalType::Decimal {
                scale: 3,
                precision: 29,
            }),
        )
        .unwrap();
        assert_eq!(storage.physical, PhysicalType::FIXED_LEN_BYTE_ARRAY);
        assert_eq!(storage.length, DECIMAL_BYTE_WIDTH);
        assert_eq!(
            decode(storage).unwrap(),
            ElementType::Decimal {
                precision: 29,
                scale: 3
            }
        );
    }

    #[test]
    fn unsupported_descriptors_name_the_column() {
        let err = decode(StorageType::new(PhysicalType::INT96, None)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { ref column, .. } if column == "c"));
        assert!(err.to_string().contains("INT96"));

        let bare_fixed =
            StorageType::new(PhysicalType::FIXED_LEN_BYTE_ARRAY, None).with_length(12);
        assert!(decode(bare_fixed).is_err());

        let json = StorageType::new(PhysicalType::BYTE_ARRAY, Some(LogicalType::Json));
        assert!(decode(json).is_err());
    }
}
