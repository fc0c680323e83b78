//! Error types for dynamic tables and the read/write orchestrators.

use arrow_schema::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Errors that can occur when reading, writing or manipulating dynamic tables.
#[derive(Debug, Error)]
pub enum DynError {
    /// A column's storage descriptor or data type falls outside the catalogue.
    #[error("unsupported type for column '{column}': {descriptor}")]
    UnsupportedType {
        /// Column the type belongs to.
        column: String,
        /// Human-readable rendering of the offending type.
        descriptor: String,
    },

    /// A requested column name is not present in the file or table.
    #[error("column '{name}' not found")]
    InvalidColumn {
        /// The unknown column name.
        name: String,
    },

    /// A write or conversion was configured in a way that cannot be honoured.
    #[error("invalid configuration for column '{column}': {message}")]
    Configuration {
        /// Column the configuration applies to.
        column: String,
        /// Description of the problem.
        message: String,
    },

    /// An index exceeded the length of the thing it addressed.
    #[error("{what} index {index} out of bounds for length {len}")]
    OutOfBounds {
        /// What was indexed (row, row group, ...).
        what: &'static str,
        /// Provided index.
        index: usize,
        /// Valid length.
        len: usize,
    },

    /// A value or stream did not match the backing type of a column.
    #[error("type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Column being accessed.
        column: String,
        /// Expected type.
        expected: String,
        /// Type encountered.
        actual: String,
    },

    /// A column's length differs from the rest of the table.
    #[error("column '{column}' has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Offending column.
        column: String,
        /// Length shared by the preceding columns.
        expected: usize,
        /// Length of the offending column.
        actual: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
    },

    /// Error raised by a typed column stream or binding.
    #[error(transparent)]
    Typed(typed_parquet::Error),

    /// Error reported by the parquet reader or writer.
    #[error(transparent)]
    Parquet(#[from] ParquetError),

    /// Error reported by arrow while building arrays or batches.
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    /// I/O failure opening or creating a file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DynError {
    /// Create a type mismatch error.
    pub fn type_mismatch(
        column: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an out-of-bounds error.
    pub fn out_of_bounds(what: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfBounds { what, index, len }
    }
}

impl From<typed_parquet::Error> for DynError {
    fn from(err: typed_parquet::Error) -> Self {
        match err {
            typed_parquet::Error::UnsupportedType { column, descriptor } => {
                DynError::UnsupportedType { column, descriptor }
            }
            typed_parquet::Error::Configuration { column, message } => {
                DynError::Configuration { column, message }
            }
            typed_parquet::Error::Parquet(e) => DynError::Parquet(e),
            other => DynError::Typed(other),
        }
    }
}
