//! Error types for typed-parquet.

use parquet::errors::ParquetError;
use thiserror::Error;

/// Errors raised by the type catalogue and the typed column streams.
#[derive(Debug, Error)]
pub enum Error {
    /// A storage descriptor or element type falls outside the catalogue.
    #[error("unsupported type for column '{column}': {descriptor}")]
    UnsupportedType {
        /// Column the type belongs to.
        column: String,
        /// Human-readable rendering of the offending descriptor.
        descriptor: String,
    },
    /// A write was configured in a way the catalogue cannot honour.
    #[error("invalid configuration for column '{column}': {message}")]
    Configuration {
        /// Column the configuration applies to.
        column: String,
        /// Description of the problem.
        message: String,
    },
    /// A null was found where a required element was expected.
    #[error("unexpected null at index {index} in required column '{column}'")]
    UnexpectedNull {
        /// Column being read or written.
        column: String,
        /// Row index within the current batch.
        index: usize,
    },
    /// A physical value could not be converted to or from its element type.
    #[error("invalid value for {target}: {message}")]
    InvalidValue {
        /// Element type the conversion targeted.
        target: &'static str,
        /// Description of the failure.
        message: String,
    },
    /// A column chunk ended before its declared row count.
    #[error("column '{column}' ended after {read} of {expected} rows")]
    Truncated {
        /// Column being read.
        column: String,
        /// Rows read before the chunk ran out.
        read: usize,
        /// Rows declared by the row group metadata.
        expected: usize,
    },
    /// A typed stream was opened against a column of a different physical type.
    #[error("physical type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Column being opened.
        column: String,
        /// Physical type required by the element binding.
        expected: parquet::basic::Type,
        /// Physical type declared by the column.
        actual: parquet::basic::Type,
    },
    /// Error reported by the underlying parquet reader or writer.
    #[error(transparent)]
    Parquet(#[from] ParquetError),
}

impl Error {
    /// Create an unsupported type error.
    pub fn unsupported(column: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self::UnsupportedType {
            column: column.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(target: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            target,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
