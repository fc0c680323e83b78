//! Column transfer: stream a column chunk into a region of a dynamic column.

use typed_parquet::{bridge::LogicalElement, LogicalColumnReader, TypedBatch};

use crate::{
    dispatch::{DynValue, ReaderVisitor},
    DynColumn, DynError,
};

/// Visitor draining a reader into `column[offset..]`.
///
/// Rows land at `offset + running + i`, where `running` counts rows already
/// transferred from this chunk; nulls are written as nulls. One batch buffer with
/// the reader's buffer length is allocated per stream. Yields the number of rows
/// transferred.
pub struct ColumnSetter<'a> {
    /// Destination column.
    pub column: &'a mut DynColumn,
    /// First destination row.
    pub offset: usize,
}

impl ReaderVisitor for ColumnSetter<'_> {
    type Output = usize;

    fn visit<E>(self, reader: &mut LogicalColumnReader<E>) -> Result<usize, DynError>
    where
        E: LogicalElement,
        E::Value: DynValue,
    {
        let kind = self.column.kind();
        let name = self.column.name().to_string();
        let values = E::Value::values_mut(self.column.data_mut())
            .ok_or_else(|| DynError::type_mismatch(&name, kind, reader.element_type()))?;

        let mut batch = TypedBatch::<E>::with_capacity(reader.buffer_length());
        let mut running = 0;
        while reader.has_next() {
            let read = reader.read_batch(&mut batch)?;
            for (i, element) in batch.iter().enumerate() {
                let value = element.as_option().cloned().map(DynValue::into_native);
                values.set(self.offset + running + i, value)?;
            }
            running += read;
        }
        Ok(running)
    }
}
