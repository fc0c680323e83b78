//! Column emitter: write a window of a dynamic column as one batch.

use typed_parquet::{bridge::LogicalElement, LogicalColumnWriter, TypedBatch};

use crate::{
    dispatch::{DynValue, WriterVisitor},
    DynColumn, DynError,
};

/// Visitor writing `column[offset..offset + batch_size]` with a single
/// `write_batch` call.
pub struct ColumnEmitter<'a> {
    /// Source column.
    pub column: &'a DynColumn,
    /// First source row.
    pub offset: usize,
    /// Number of rows to write.
    pub batch_size: usize,
}

impl WriterVisitor for ColumnEmitter<'_> {
    type Output = ();

    fn visit<E>(self, writer: &mut LogicalColumnWriter<'_, E>) -> Result<(), DynError>
    where
        E: LogicalElement,
        E::Value: DynValue,
    {
        let values = E::Value::values(self.column.data()).ok_or_else(|| {
            DynError::type_mismatch(
                self.column.name(),
                writer.descriptor().physical_type(),
                self.column.kind(),
            )
        })?;
        let end = self.offset + self.batch_size;
        if end > values.len() {
            return Err(DynError::out_of_bounds("row", end - 1, values.len()));
        }

        let mut batch = TypedBatch::<E>::with_capacity(self.batch_size);
        for index in self.offset..end {
            let value = values.get(index)?.map(E::Value::from_native);
            let element = E::from_option(value).ok_or_else(|| {
                DynError::Typed(typed_parquet::Error::UnexpectedNull {
                    column: self.column.name().to_string(),
                    index,
                })
            })?;
            let pushed = batch.push(element);
            debug_assert!(pushed.is_ok(), "window exceeds batch capacity");
        }
        writer.write_batch(&batch)?;
        Ok(())
    }
}
