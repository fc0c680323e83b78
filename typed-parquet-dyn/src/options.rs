//! Read and write configuration.

use std::{collections::HashMap, sync::Arc};

use parquet::{basic::LogicalType, file::properties::WriterProperties};

/// Default number of rows pulled per typed batch.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Default maximum number of rows per written row group.
pub const DEFAULT_MAX_ROW_GROUP_ROWS: usize = 1024 * 1024;

/// Options for [`read_table`](crate::read_table).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadOptions {
    /// Columns to read, in output order. `None` reads every column.
    pub columns: Option<Vec<String>>,
    /// Row groups to read, in output order. `None` reads every row group.
    pub row_groups: Option<Vec<usize>>,
    /// Rows pulled per typed batch.
    pub batch_size: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            columns: None,
            row_groups: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ReadOptions {
    /// Restrict the read to the named columns.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict the read to the given row groups.
    #[must_use]
    pub fn with_row_groups(mut self, row_groups: impl Into<Vec<usize>>) -> Self {
        self.row_groups = Some(row_groups.into());
        self
    }

    /// Set the rows pulled per typed batch (at least one).
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Options for [`write_table`](crate::write_table).
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Maximum number of rows per row group.
    pub max_row_group_rows: usize,
    /// Logical annotation overrides keyed by column name.
    pub logical_type_overrides: HashMap<String, LogicalType>,
    /// Properties handed to the parquet writer unchanged.
    pub writer_properties: Arc<WriterProperties>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            max_row_group_rows: DEFAULT_MAX_ROW_GROUP_ROWS,
            logical_type_overrides: HashMap::new(),
            writer_properties: Arc::new(WriterProperties::builder().build()),
        }
    }
}

impl WriteOptions {
    /// Set the maximum rows per row group (at least one).
    #[must_use]
    pub fn with_max_row_group_rows(mut self, rows: usize) -> Self {
        self.max_row_group_rows = rows.max(1);
        self
    }

    /// Override the logical annotation of one column.
    #[must_use]
    pub fn with_logical_type(mut self, column: impl Into<String>, logical: LogicalType) -> Self {
        self.logical_type_overrides.insert(column.into(), logical);
        self
    }

    /// Use the given writer properties.
    #[must_use]
    pub fn with_writer_properties(mut self, properties: WriterProperties) -> Self {
        self.writer_properties = Arc::new(properties);
        self
    }
}
