//! Typed column streams: [`TypedBatch`], [`LogicalColumnReader`] and
//! [`LogicalColumnWriter`].
//!
//! A reader pulls at most one batch capacity of rows per call and yields elements of
//! a statically known shape `E`; a writer takes a slice of elements and hands values
//! plus definition levels to the physical writer in a single call. Physical values
//! and definition levels go through scratch buffers owned by the stream, so the
//! per-batch cost is the element conversion only.

use std::{marker::PhantomData, ops::Deref};

use parquet::{
    column::{
        reader::{get_typed_column_reader, ColumnReader, ColumnReaderImpl},
        writer::ColumnWriter,
    },
    data_type::DataType,
    file::writer::SerializedColumnWriter,
    schema::types::ColumnDescPtr,
};

use super::{LogicalElement, ParquetBinding};
use crate::{
    error::{Error, Result},
    schema::{resolve_column, ElementType},
};

type Physical<E> = <<E as LogicalElement>::Value as ParquetBinding>::Physical;
type PhysicalValue<E> = <Physical<E> as DataType>::T;

/// Fixed-capacity, reusable buffer of elements.
///
/// The backing storage is allocated once with the requested capacity and is cleared,
/// not reallocated, between fills.
#[derive(Debug, Clone)]
pub struct TypedBatch<E> {
    values: Vec<E>,
    capacity: usize,
}

impl<E> TypedBatch<E> {
    /// Create an empty batch holding at most `capacity` elements (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of elements per fill.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Remaining room before the batch is full.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.values.len()
    }

    /// Drop all elements, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Append an element.
    ///
    /// # Errors
    /// Returns the element back when the batch is full.
    pub fn push(&mut self, value: E) -> Result<(), E> {
        if self.values.len() == self.capacity {
            return Err(value);
        }
        self.values.push(value);
        Ok(())
    }
}

impl<E> Deref for TypedBatch<E> {
    type Target = [E];
    fn deref(&self) -> &[E] {
        &self.values
    }
}

/// Pull-based reader of one column chunk yielding elements of shape `E`.
pub struct LogicalColumnReader<E: LogicalElement> {
    reader: ColumnReaderImpl<Physical<E>>,
    descr: ColumnDescPtr,
    element_type: ElementType,
    buffer_length: usize,
    total: usize,
    remaining: usize,
    values: Vec<PhysicalValue<E>>,
    def_levels: Vec<i16>,
}

impl<E: LogicalElement> LogicalColumnReader<E> {
    /// Wrap a physical column reader for a chunk of `num_rows` rows.
    ///
    /// `buffer_length` is the preferred batch capacity for callers allocating a
    /// [`TypedBatch`] for this stream.
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] if the column's physical type differs from the
    /// one `E` binds to, and [`Error::UnsupportedType`] if the descriptor is outside
    /// the catalogue.
    pub fn try_new(
        reader: ColumnReader,
        descr: ColumnDescPtr,
        num_rows: usize,
        buffer_length: usize,
    ) -> Result<Self> {
        let expected = Physical::<E>::get_physical_type();
        if descr.physical_type() != expected {
            return Err(Error::TypeMismatch {
                column: descr.name().to_string(),
                expected,
                actual: descr.physical_type(),
            });
        }
        let (element_type, _) = resolve_column(&descr)?;
        let buffer_length = buffer_length.max(1);
        Ok(Self {
            reader: get_typed_column_reader::<Physical<E>>(reader),
            descr,
            element_type,
            buffer_length,
            total: num_rows,
            remaining: num_rows,
            values: Vec::with_capacity(buffer_length),
            def_levels: Vec::with_capacity(buffer_length),
        })
    }

    /// Whether rows remain in the chunk.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// Preferred batch capacity for this stream.
    #[inline]
    pub fn buffer_length(&self) -> usize {
        self.buffer_length
    }

    /// Element type the column decodes to.
    #[inline]
    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    /// Descriptor of the column being read.
    #[inline]
    pub fn descriptor(&self) -> &ColumnDescPtr {
        &self.descr
    }

    /// Clear `batch` and fill it with up to `batch.capacity()` rows.
    ///
    /// Returns the number of rows read; it is smaller than the capacity only on the
    /// final pull and zero once the chunk is exhausted.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] when the chunk runs out before its declared row
    /// count, [`Error::UnexpectedNull`] when a null reaches a required element shape,
    /// and conversion errors from the element binding.
    pub fn read_batch(&mut self, batch: &mut TypedBatch<E>) -> Result<usize> {
        batch.clear();
        if self.remaining == 0 {
            return Ok(0);
        }
        let want = self.remaining.min(batch.capacity());
        self.values.clear();
        self.def_levels.clear();
        let (records, values_read, _) =
            self.reader
                .read_records(want, Some(&mut self.def_levels), None, &mut self.values)?;
        if records == 0 {
            return Err(Error::Truncated {
                column: self.descr.name().to_string(),
                read: self.total - self.remaining,
                expected: self.total,
            });
        }

        let max_def = self.descr.max_def_level();
        let mut values = self.values[..values_read].iter();
        for index in 0..records {
            let present = max_def == 0 || self.def_levels[index] == max_def;
            let value = if present {
                match values.next() {
                    Some(v) => Some(E::Value::from_physical(v)?),
                    None => {
                        return Err(Error::Truncated {
                            column: self.descr.name().to_string(),
                            read: self.total - self.remaining + index,
                            expected: self.total,
                        });
                    }
                }
            } else {
                None
            };
            let element = E::from_option(value).ok_or_else(|| Error::UnexpectedNull {
                column: self.descr.name().to_string(),
                index,
            })?;
            let pushed = batch.push(element);
            debug_assert!(pushed.is_ok(), "read_records returned more rows than requested");
        }
        self.remaining -= records;
        Ok(records)
    }
}

/// Writer of one column chunk taking elements of shape `E`.
pub struct LogicalColumnWriter<'a, E: LogicalElement> {
    writer: SerializedColumnWriter<'a>,
    descr: ColumnDescPtr,
    values: Vec<PhysicalValue<E>>,
    def_levels: Vec<i16>,
    _pd: PhantomData<E>,
}

macro_rules! descriptor_of {
    ($writer:expr, $($variant:ident),*) => {
        match $writer {
            $(ColumnWriter::$variant(w) => w.get_descriptor().clone(),)*
        }
    };
}

impl<'a, E: LogicalElement> LogicalColumnWriter<'a, E> {
    /// Wrap the next column writer of a row group.
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] if the column's physical type differs from the
    /// one `E` binds to.
    pub fn try_new(mut writer: SerializedColumnWriter<'a>) -> Result<Self> {
        let descr: ColumnDescPtr = descriptor_of!(
            writer.untyped(),
            BoolColumnWriter,
            Int32ColumnWriter,
            Int64ColumnWriter,
            Int96ColumnWriter,
            FloatColumnWriter,
            DoubleColumnWriter,
            ByteArrayColumnWriter,
            FixedLenByteArrayColumnWriter
        );
        let expected = Physical::<E>::get_physical_type();
        if descr.physical_type() != expected {
            return Err(Error::TypeMismatch {
                column: descr.name().to_string(),
                expected,
                actual: descr.physical_type(),
            });
        }
        Ok(Self {
            writer,
            descr,
            values: Vec::new(),
            def_levels: Vec::new(),
            _pd: PhantomData,
        })
    }

    /// Descriptor of the column being written.
    #[inline]
    pub fn descriptor(&self) -> &ColumnDescPtr {
        &self.descr
    }

    /// Write a batch of elements in one physical call.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedNull`] for a `None` in a required column and
    /// conversion errors from the element binding.
    pub fn write_batch(&mut self, batch: &[E]) -> Result<()> {
        self.values.clear();
        self.def_levels.clear();
        let nullable = self.descr.max_def_level() > 0;
        for (index, element) in batch.iter().enumerate() {
            match element.as_option() {
                Some(value) => {
                    self.values.push(value.to_physical()?);
                    if nullable {
                        self.def_levels.push(1);
                    }
                }
                None if nullable => self.def_levels.push(0),
                None => {
                    return Err(Error::UnexpectedNull {
                        column: self.descr.name().to_string(),
                        index,
                    });
                }
            }
        }
        let def_levels = nullable.then_some(self.def_levels.as_slice());
        self.writer
            .typed::<Physical<E>>()
            .write_batch(&self.values, def_levels, None)?;
        Ok(())
    }

    /// Flush and close the column chunk.
    ///
    /// # Errors
    /// Propagates errors from the underlying writer.
    pub fn close(self) -> Result<()> {
        self.writer.close()?;
        Ok(())
    }
}
