#![deny(missing_docs)]
//! typed-parquet core: element type catalogue and typed Parquet column streams.

pub mod bridge;
pub mod error;
pub mod schema;

/// Prelude exporting the most common traits and markers.
pub mod prelude {
    pub use crate::bridge::{LogicalElement, ParquetBinding};
    pub use crate::schema::{ElementType, StorageType, TimeUnit};
}

// Re-export parquet so downstream crates build against the same version.
pub use parquet;

// Public re-exports for convenience
pub use crate::{
    bridge::{
        Date, Decimal, DecimalBytes, DecimalFixed, DecimalInt32, DecimalInt64,
        LogicalColumnReader, LogicalColumnWriter, Microsecond, Millisecond, Nanosecond, Time,
        Timestamp, TypedBatch,
    },
    error::{Error, Result},
};
