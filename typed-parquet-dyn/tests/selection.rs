mod common;

use parquet::file::reader::FileReader;
use typed_parquet_dyn::{
    read, read_columns, read_columns_row_groups, read_row_groups, read_table, ColumnData,
    ColumnKind, DynCell, DynColumn, DynError, DynTable, ReadOptions, WriteOptions,
};

use common::{open, write_bytes};

const ROWS: usize = 10_000;
const GROUP: usize = 1024;

fn sequential() -> DynTable {
    let ids: Vec<i32> = (0..ROWS as i32).collect();
    let labels: Vec<Option<String>> = (0..ROWS)
        .map(|i| (i % 3 != 0).then(|| format!("row-{i}")))
        .collect();
    let halves: Vec<f64> = (0..ROWS).map(|i| i as f64 / 2.0).collect();
    DynTable::try_new(vec![
        DynColumn::new("a", ColumnData::Int32(ids.into())),
        DynColumn::new("b", ColumnData::Utf8(labels.into())),
        DynColumn::new("c", ColumnData::Float64(halves.into())),
    ])
    .unwrap()
}

fn label(source: usize) -> DynCell {
    if source % 3 == 0 {
        DynCell::Null
    } else {
        DynCell::Str(format!("row-{source}"))
    }
}

fn grouped_file() -> parquet::file::serialized_reader::SerializedFileReader<bytes::Bytes> {
    let options = WriteOptions::default().with_max_row_group_rows(GROUP);
    open(write_bytes(&sequential(), &options))
}

#[test]
fn rows_split_into_bounded_row_groups() {
    let reader = grouped_file();
    let metadata = reader.metadata();
    assert_eq!(metadata.num_row_groups(), 10);
    for g in 0..9 {
        assert_eq!(metadata.row_group(g).num_rows(), GROUP as i64);
    }
    assert_eq!(metadata.row_group(9).num_rows(), 784);
    assert_eq!(read(&reader).unwrap(), sequential());
}

#[test]
fn small_batches_cover_every_row() {
    let reader = grouped_file();
    let table = read_table(&reader, &ReadOptions::default().with_batch_size(7)).unwrap();
    assert_eq!(table, sequential());
}

#[test]
fn row_group_subset_keeps_selection_order() {
    let reader = grouped_file();
    let selected = [1usize, 6, 3, 4];
    let table = read_row_groups(&reader, &selected).unwrap();
    assert_eq!(table.num_rows(), 4 * GROUP);

    let a = table.column_by_name("a").unwrap();
    let b = table.column_by_name("b").unwrap();
    for row in 0..4 * GROUP {
        let source = selected[row / GROUP] * GROUP + row % GROUP;
        assert_eq!(a.get(row).unwrap(), DynCell::I32(source as i32), "row {row}");
        assert_eq!(b.get(row).unwrap(), label(source), "row {row}");
    }
}

#[test]
fn last_row_group_alone() {
    let reader = grouped_file();
    let table = read_row_groups(&reader, &[9]).unwrap();
    assert_eq!(table.num_rows(), 784);
    assert_eq!(
        table.column(0).unwrap().get(0).unwrap(),
        DynCell::I32((9 * GROUP) as i32)
    );
}

#[test]
fn column_subset_keeps_selection_order() {
    let reader = grouped_file();
    let table = read_columns(&reader, &["c", "a"]).unwrap();
    let names: Vec<_> = table.columns().iter().map(DynColumn::name).collect();
    assert_eq!(names, ["c", "a"]);
    assert_eq!(table.num_rows(), ROWS);
    assert_eq!(table.column(0).unwrap().kind(), ColumnKind::Float64);
}

#[test]
fn columns_and_row_groups_combined() {
    let reader = grouped_file();
    let table = read_columns_row_groups(&reader, &["b"], &[2]).unwrap();
    assert_eq!(table.num_columns(), 1);
    assert_eq!(table.num_rows(), GROUP);
    let column = table.column(0).unwrap();
    for row in [0, 1, 2, GROUP - 1] {
        assert_eq!(column.get(row).unwrap(), label(2 * GROUP + row));
    }
    assert_eq!(column.get(2).unwrap(), DynCell::Str("row-2050".into()));
}

#[test]
fn unknown_column_is_named() {
    let reader = grouped_file();
    let err = read_columns(&reader, &["a", "nope"]).unwrap_err();
    assert!(matches!(err, DynError::InvalidColumn { ref name } if name == "nope"));
    assert!(err.to_string().contains("nope"));
}

#[test]
fn out_of_range_row_group_is_rejected() {
    let reader = grouped_file();
    let err = read_row_groups(&reader, &[0, 10]).unwrap_err();
    assert!(matches!(
        err,
        DynError::OutOfBounds {
            index: 10,
            len: 10,
            ..
        }
    ));
}

#[test]
fn empty_row_group_selection_yields_typed_empty_columns() {
    let reader = grouped_file();
    let table = read_row_groups(&reader, &[]).unwrap();
    assert_eq!(table.num_rows(), 0);
    assert_eq!(table.num_columns(), 3);
    assert_eq!(table.column(1).unwrap().kind(), ColumnKind::Utf8);
}
