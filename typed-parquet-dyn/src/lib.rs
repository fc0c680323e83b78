#![deny(missing_docs)]
//! Dynamic tables for typed-parquet.
//!
//! This crate reads Parquet files into runtime-typed [`DynTable`]s and writes them
//! back, complementing the compile-time element bindings and column streams in
//! `typed-parquet`. Column types are decided once per column stream by the
//! [`dispatch`] bridge; all per-value work runs in monomorphized visitors.

mod arrow;
mod cell;
mod column;
pub mod dispatch;
mod emit;
mod error;
mod materialize;
mod options;
mod read;
mod table;
mod transfer;
mod values;
mod write;

pub use cell::DynCell;
pub use column::{ColumnData, ColumnKind, DynColumn};
pub use emit::ColumnEmitter;
pub use error::DynError;
pub use materialize::ColumnCreator;
pub use options::{ReadOptions, WriteOptions, DEFAULT_BATCH_SIZE, DEFAULT_MAX_ROW_GROUP_ROWS};
pub use read::{read, read_columns, read_columns_row_groups, read_path, read_row_groups, read_table};
pub use table::DynTable;
pub use transfer::ColumnSetter;
pub use values::ColumnValues;
pub use write::{write_path, write_table};
