//! Column materializer: allocate the output column for a file column.

use typed_parquet::{bridge::LogicalElement, LogicalColumnReader};

use crate::{
    dispatch::{DynValue, ReaderVisitor},
    ColumnKind, DynColumn, DynError,
};

/// Visitor creating an all-null column of `len` rows whose backing kind matches the
/// reader's element type. Nullable and required readers yield the same kind.
pub struct ColumnCreator<'a> {
    /// Name of the column to create.
    pub name: &'a str,
    /// Number of rows to allocate.
    pub len: usize,
}

impl ReaderVisitor for ColumnCreator<'_> {
    type Output = DynColumn;

    fn visit<E>(self, reader: &mut LogicalColumnReader<E>) -> Result<DynColumn, DynError>
    where
        E: LogicalElement,
        E::Value: DynValue,
    {
        let kind = ColumnKind::of(reader.element_type());
        Ok(DynColumn::new_null(self.name, &kind, self.len))
    }
}
