//! Read orchestration: file → [`DynTable`].
//!
//! A read resolves the column and row-group selection against the file metadata,
//! resolves the element type of every selected column before touching row data,
//! allocates one output column per selected column sized to the sum of the
//! selected row groups, and then streams each (row group, column) chunk into its
//! region of the output.

use std::{fs::File, path::Path};

use parquet::file::{reader::FileReader, serialized_reader::SerializedFileReader};
use typed_parquet::schema::resolve_column;

use crate::{
    dispatch::LogicalReader, materialize::ColumnCreator, transfer::ColumnSetter, ColumnKind,
    DynColumn, DynError, DynTable, ReadOptions,
};

/// Read every column of every row group.
///
/// # Errors
/// See [`read_table`].
pub fn read<R: FileReader + ?Sized>(file: &R) -> Result<DynTable, DynError> {
    read_table(file, &ReadOptions::default())
}

/// Read the named columns of every row group.
///
/// # Errors
/// See [`read_table`].
pub fn read_columns<R: FileReader + ?Sized>(
    file: &R,
    columns: &[&str],
) -> Result<DynTable, DynError> {
    read_table(file, &ReadOptions::default().with_columns(columns.iter().copied()))
}

/// Read every column of the given row groups.
///
/// # Errors
/// See [`read_table`].
pub fn read_row_groups<R: FileReader + ?Sized>(
    file: &R,
    row_groups: &[usize],
) -> Result<DynTable, DynError> {
    read_table(file, &ReadOptions::default().with_row_groups(row_groups))
}

/// Read the named columns of the given row groups.
///
/// # Errors
/// See [`read_table`].
pub fn read_columns_row_groups<R: FileReader + ?Sized>(
    file: &R,
    columns: &[&str],
    row_groups: &[usize],
) -> Result<DynTable, DynError> {
    read_table(
        file,
        &ReadOptions::default()
            .with_columns(columns.iter().copied())
            .with_row_groups(row_groups),
    )
}

/// Open the file at `path` and read it.
///
/// # Errors
/// Returns [`DynError::Io`] when the file cannot be opened, otherwise see
/// [`read_table`].
pub fn read_path(path: impl AsRef<Path>, options: &ReadOptions) -> Result<DynTable, DynError> {
    let file = File::open(path.as_ref())?;
    let reader = SerializedFileReader::new(file)?;
    read_table(&reader, options)
}

/// Read a selection of columns and row groups into a [`DynTable`].
///
/// Columns appear in selection order and rows in row-group selection order.
///
/// # Errors
/// - [`DynError::InvalidColumn`] for a name not in the file schema.
/// - [`DynError::OutOfBounds`] for a row-group index past the last row group.
/// - [`DynError::UnsupportedType`] for a selected column outside the catalogue,
///   raised before any row data is read.
/// - Stream and storage errors while reading.
pub fn read_table<R: FileReader + ?Sized>(
    file: &R,
    options: &ReadOptions,
) -> Result<DynTable, DynError> {
    let metadata = file.metadata();
    let schema = metadata.file_metadata().schema_descr();

    let indices: Vec<usize> = match &options.columns {
        None => (0..schema.num_columns()).collect(),
        Some(names) => names
            .iter()
            .map(|name| {
                schema
                    .columns()
                    .iter()
                    .position(|c| c.name() == name.as_str())
                    .ok_or_else(|| DynError::InvalidColumn { name: name.clone() })
            })
            .collect::<Result<_, _>>()?,
    };

    let num_row_groups = metadata.num_row_groups();
    let row_groups: Vec<usize> = match &options.row_groups {
        None => (0..num_row_groups).collect(),
        Some(selected) => {
            if let Some(&bad) = selected.iter().find(|&&g| g >= num_row_groups) {
                return Err(DynError::out_of_bounds("row group", bad, num_row_groups));
            }
            selected.clone()
        }
    };

    // Fail fast on unsupported columns.
    let kinds = indices
        .iter()
        .map(|&i| {
            let (element, _) = resolve_column(&schema.column(i))?;
            Ok(ColumnKind::of(&element))
        })
        .collect::<Result<Vec<_>, DynError>>()?;

    let num_rows: usize = row_groups
        .iter()
        .map(|&g| metadata.row_group(g).num_rows() as usize)
        .sum();

    let span = tracing::debug_span!(
        "parquet.read",
        columns = indices.len(),
        row_groups = row_groups.len(),
        rows = num_rows
    );
    let _span_guard = span.entered();

    let mut columns = allocate(file, &indices, &kinds, &row_groups, num_rows, options)?;

    let mut offset = 0;
    for &group in &row_groups {
        let row_group = file.get_row_group(group)?;
        let rows = row_group.metadata().num_rows() as usize;
        let _group_guard = tracing::debug_span!("row_group", index = group, rows).entered();
        for (column, &index) in columns.iter_mut().zip(&indices) {
            let descr = row_group.metadata().column(index).column_descr_ptr();
            let mut reader = LogicalReader::try_new(
                row_group.get_column_reader(index)?,
                descr,
                rows,
                options.batch_size,
            )?;
            reader.accept(ColumnSetter { column, offset })?;
        }
        offset += rows;
    }

    tracing::debug!(rows = num_rows, "parquet read completed");
    DynTable::try_new(columns)
}

// Output columns are created through the first selected row group's readers; an
// empty selection falls back to the resolved kinds.
fn allocate<R: FileReader + ?Sized>(
    file: &R,
    indices: &[usize],
    kinds: &[ColumnKind],
    row_groups: &[usize],
    num_rows: usize,
    options: &ReadOptions,
) -> Result<Vec<DynColumn>, DynError> {
    let schema = file.metadata().file_metadata().schema_descr();
    let Some(&first) = row_groups.first() else {
        return Ok(indices
            .iter()
            .zip(kinds)
            .map(|(&i, kind)| DynColumn::new_null(schema.column(i).name(), kind, num_rows))
            .collect());
    };
    let row_group = file.get_row_group(first)?;
    let rows = row_group.metadata().num_rows() as usize;
    indices
        .iter()
        .map(|&index| {
            let descr = row_group.metadata().column(index).column_descr_ptr();
            let name = descr.name().to_string();
            let mut reader = LogicalReader::try_new(
                row_group.get_column_reader(index)?,
                descr,
                rows,
                options.batch_size,
            )?;
            reader.accept(ColumnCreator {
                name: &name,
                len: num_rows,
            })
        })
        .collect()
}
