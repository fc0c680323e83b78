//! Write orchestration: [`DynTable`] → file.
//!
//! The whole schema, including logical type overrides and the repetition of every
//! column, is resolved before the sink is touched, so configuration errors never
//! leave a partial file behind. Rows are then emitted in windows of at most
//! `max_row_group_rows`, one row group per window, and the file is finalised after
//! the last window.

use std::{fs::File, io::Write, path::Path, sync::Arc};

use parquet::{
    basic::Repetition,
    errors::ParquetError,
    file::writer::SerializedFileWriter,
    schema::types::{Type, TypePtr},
};

use typed_parquet::schema::ElementType;

use crate::{
    dispatch::LogicalWriter, emit::ColumnEmitter, values::ColumnValues, ColumnData, ColumnKind,
    DynColumn, DynError, DynTable, WriteOptions,
};

struct ColumnPlan {
    kind: ColumnKind,
    nullable: bool,
}

struct WritePlan {
    schema: TypePtr,
    columns: Vec<ColumnPlan>,
}

/// Write `table` to `sink` and return the sink once the file is finalised.
///
/// A column is written `OPTIONAL` when it holds at least one null and `REQUIRED`
/// otherwise.
///
/// # Errors
/// - [`DynError::InvalidColumn`] for an override naming no column of the table.
/// - [`DynError::Configuration`] for a decimal column without a `DECIMAL` override,
///   an override the column's physical type cannot carry, or an override under which
///   a stored value could not be read back.
/// - Writer errors while emitting row groups.
pub fn write_table<W: Write + Send>(
    table: &DynTable,
    sink: W,
    options: &WriteOptions,
) -> Result<W, DynError> {
    let plan = plan(table, options)?;
    write_planned(table, &plan, sink, options)
}

/// Write `table` to a new file at `path`.
///
/// Nothing is created when the schema cannot be resolved; a file left incomplete
/// by a later failure is removed.
///
/// # Errors
/// See [`write_table`]; [`DynError::Io`] when the file cannot be created.
pub fn write_path(
    table: &DynTable,
    path: impl AsRef<Path>,
    options: &WriteOptions,
) -> Result<(), DynError> {
    let path = path.as_ref();
    let plan = plan(table, options)?;
    let file = File::create(path)?;
    match write_planned(table, &plan, file, options) {
        Ok(file) => {
            file.sync_all()?;
            Ok(())
        }
        Err(err) => {
            if let Err(rm) = std::fs::remove_file(path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %rm,
                    "failed to remove partial file"
                );
            }
            Err(err)
        }
    }
}

fn plan(table: &DynTable, options: &WriteOptions) -> Result<WritePlan, DynError> {
    for name in options.logical_type_overrides.keys() {
        table.column_by_name(name)?;
    }

    let mut fields = Vec::with_capacity(table.num_columns());
    let mut columns = Vec::with_capacity(table.num_columns());
    for column in table.columns() {
        let kind = column.kind();
        let logical_override = options.logical_type_overrides.get(column.name());
        let storage = kind.storage_type(column.name(), logical_override)?;
        if logical_override.is_some() {
            check_override_values(column, &storage.element_type(column.name())?)?;
        }
        let nullable = column.null_count() > 0;
        let repetition = if nullable {
            Repetition::OPTIONAL
        } else {
            Repetition::REQUIRED
        };
        fields.push(storage.to_parquet_type(column.name(), repetition)?);
        columns.push(ColumnPlan { kind, nullable });
    }

    let schema = Type::group_type_builder("schema")
        .with_fields(fields)
        .build()?;
    Ok(WritePlan {
        schema: Arc::new(schema),
        columns,
    })
}

// An override may narrow the value domain of the backing kind; every present value
// must still decode under the annotated element type.
fn check_override_values(column: &DynColumn, element: &ElementType) -> Result<(), DynError> {
    let (min, max) = match element {
        ElementType::Int8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
        ElementType::Int16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
        ElementType::UInt8 => (0, i64::from(u8::MAX)),
        ElementType::UInt16 => (0, i64::from(u16::MAX)),
        ElementType::Utf8 => {
            return match column.data() {
                ColumnData::Binary(values) => {
                    let invalid = values
                        .iter()
                        .position(|v| v.is_some_and(|b| std::str::from_utf8(b).is_err()));
                    match invalid {
                        Some(row) => Err(out_of_domain(column, element, row, "invalid UTF-8")),
                        None => Ok(()),
                    }
                }
                _ => Ok(()),
            };
        }
        _ => return Ok(()),
    };

    // Values as stored in INT32, the only physical type narrow annotations apply to
    let outside = match column.data() {
        ColumnData::Int8(v) => first_outside(v, i64::from, min, max),
        ColumnData::Int16(v) => first_outside(v, i64::from, min, max),
        ColumnData::Int32(v) => first_outside(v, i64::from, min, max),
        ColumnData::UInt8(v) => first_outside(v, i64::from, min, max),
        ColumnData::UInt16(v) => first_outside(v, i64::from, min, max),
        ColumnData::UInt32(v) => first_outside(v, |x| i64::from(x as i32), min, max),
        _ => None,
    };
    match outside {
        Some((row, value)) => Err(out_of_domain(
            column,
            element,
            row,
            &format!("value {value} is out of range"),
        )),
        None => Ok(()),
    }
}

fn first_outside<N: Copy + Default>(
    values: &ColumnValues<N>,
    widen: impl Fn(N) -> i64,
    min: i64,
    max: i64,
) -> Option<(usize, i64)> {
    values.iter().enumerate().find_map(|(row, v)| {
        let value = widen(*v?);
        (!(min..=max).contains(&value)).then_some((row, value))
    })
}

fn out_of_domain(column: &DynColumn, element: &ElementType, row: usize, what: &str) -> DynError {
    DynError::Configuration {
        column: column.name().to_string(),
        message: format!("row {row}: {what} for overridden type {element}"),
    }
}

fn write_planned<W: Write + Send>(
    table: &DynTable,
    plan: &WritePlan,
    sink: W,
    options: &WriteOptions,
) -> Result<W, DynError> {
    let rows = table.num_rows();
    let step = options.max_row_group_rows.max(1);
    let span = tracing::debug_span!(
        "parquet.write",
        columns = table.num_columns(),
        rows,
        max_row_group_rows = step
    );
    let _span_guard = span.entered();

    let mut writer = SerializedFileWriter::new(
        sink,
        Arc::clone(&plan.schema),
        Arc::clone(&options.writer_properties),
    )?;

    let mut offset = 0;
    let mut row_groups = 0;
    while offset < rows {
        let batch_size = step.min(rows - offset);
        let _group_guard = tracing::debug_span!("row_group", offset, rows = batch_size).entered();
        let mut row_group = writer.next_row_group()?;
        for (column, column_plan) in table.columns().iter().zip(&plan.columns) {
            let next = row_group.next_column()?.ok_or_else(|| {
                ParquetError::General(format!("no column writer for '{}'", column.name()))
            })?;
            let mut column_writer =
                LogicalWriter::try_new(next, &column_plan.kind, column_plan.nullable)?;
            column_writer.accept(ColumnEmitter {
                column,
                offset,
                batch_size,
            })?;
            column_writer.close()?;
        }
        row_group.close()?;
        offset += batch_size;
        row_groups += 1;
    }

    let sink = writer.into_inner()?;
    tracing::debug!(rows, row_groups, "parquet write completed");
    Ok(sink)
}
