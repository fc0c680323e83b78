//! Benchmark: dynamic tables vs typed column streams
//!
//! - dynamic: `write_table` / `read_table` through the dispatch bridge
//! - typed: `LogicalColumnWriter` / `LogicalColumnReader` with a static element type
//!
//! Benchmark groups:
//! - write_primitives: one nullable i64 and one required f64 column
//! - read_primitives: same file read back
//! - read_batch_size: dynamic read of strings with varying batch sizes

use std::sync::Arc;

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parquet::{
    basic::Repetition,
    file::{
        properties::WriterProperties, reader::FileReader,
        serialized_reader::SerializedFileReader, writer::SerializedFileWriter,
    },
    schema::types::Type,
};
use typed_parquet::{
    schema::{ElementType, StorageType},
    LogicalColumnReader, LogicalColumnWriter, TypedBatch,
};
use typed_parquet_dyn::{
    read_table, write_table, ColumnData, DynColumn, DynTable, ReadOptions, WriteOptions,
};

fn generate(n: usize) -> (Vec<Option<i64>>, Vec<f64>) {
    let ids = (0..n).map(|i| (i % 10 != 0).then_some(i as i64)).collect();
    let scores = (0..n).map(|i| i as f64 * 1.5).collect();
    (ids, scores)
}

fn dyn_table(ids: &[Option<i64>], scores: &[f64]) -> DynTable {
    DynTable::try_new(vec![
        DynColumn::new("id", ColumnData::Int64(ids.to_vec().into())),
        DynColumn::new("score", ColumnData::Float64(scores.to_vec().into())),
    ])
    .unwrap()
}

fn typed_write(ids: &[Option<i64>], scores: &[f64]) -> Vec<u8> {
    let id = StorageType::for_element("id", &ElementType::Int64, None)
        .unwrap()
        .to_parquet_type("id", Repetition::OPTIONAL)
        .unwrap();
    let score = StorageType::for_element("score", &ElementType::Float64, None)
        .unwrap()
        .to_parquet_type("score", Repetition::REQUIRED)
        .unwrap();
    let schema = Type::group_type_builder("schema")
        .with_fields(vec![id, score])
        .build()
        .unwrap();
    let props = Arc::new(WriterProperties::builder().build());
    let mut writer = SerializedFileWriter::new(Vec::new(), Arc::new(schema), props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();

    let mut column =
        LogicalColumnWriter::<Option<i64>>::try_new(row_group.next_column().unwrap().unwrap())
            .unwrap();
    column.write_batch(ids).unwrap();
    column.close().unwrap();

    let mut column =
        LogicalColumnWriter::<f64>::try_new(row_group.next_column().unwrap().unwrap()).unwrap();
    column.write_batch(scores).unwrap();
    column.close().unwrap();

    row_group.close().unwrap();
    writer.into_inner().unwrap()
}

fn typed_sum(reader: &SerializedFileReader<Bytes>) -> f64 {
    let mut total = 0.0;
    for g in 0..reader.num_row_groups() {
        let row_group = reader.get_row_group(g).unwrap();
        let rows = row_group.metadata().num_rows() as usize;
        let descr = row_group.metadata().column(1).column_descr_ptr();
        let mut stream = LogicalColumnReader::<f64>::try_new(
            row_group.get_column_reader(1).unwrap(),
            descr,
            rows,
            4096,
        )
        .unwrap();
        let mut batch = TypedBatch::with_capacity(stream.buffer_length());
        while stream.has_next() {
            stream.read_batch(&mut batch).unwrap();
            total += batch.iter().sum::<f64>();
        }
    }
    total
}

fn bench_write_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_primitives");

    for size in [1_000, 10_000, 100_000] {
        let (ids, scores) = generate(size);
        let table = dyn_table(&ids, &scores);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("typed", size),
            &(&ids, &scores),
            |b, (ids, scores)| b.iter(|| black_box(typed_write(ids, scores))),
        );

        group.bench_with_input(BenchmarkId::new("dynamic", size), &table, |b, table| {
            b.iter(|| {
                black_box(write_table(table, Vec::new(), &WriteOptions::default()).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_read_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_primitives");

    for size in [1_000, 10_000, 100_000] {
        let (ids, scores) = generate(size);
        let data = Bytes::from(typed_write(&ids, &scores));
        let reader = SerializedFileReader::new(data).unwrap();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("typed", size), &reader, |b, reader| {
            b.iter(|| black_box(typed_sum(reader)))
        });

        group.bench_with_input(BenchmarkId::new("dynamic", size), &reader, |b, reader| {
            b.iter(|| black_box(read_table(reader, &ReadOptions::default()).unwrap()))
        });
    }

    group.finish();
}

fn bench_read_batch_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_batch_size");
    let size = 100_000;
    let labels: Vec<Option<String>> = (0..size)
        .map(|i| (i % 7 != 0).then(|| format!("label-{i}")))
        .collect();
    let table =
        DynTable::try_new(vec![DynColumn::new("label", ColumnData::Utf8(labels.into()))]).unwrap();
    let data = Bytes::from(write_table(&table, Vec::new(), &WriteOptions::default()).unwrap());
    let reader = SerializedFileReader::new(data).unwrap();

    group.throughput(Throughput::Elements(size as u64));
    for batch_size in [256, 4096, 65_536] {
        let options = ReadOptions::default().with_batch_size(batch_size);
        group.bench_with_input(
            BenchmarkId::new("dynamic", batch_size),
            &options,
            |b, options| b.iter(|| black_box(read_table(&reader, options).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_write_primitives,
    bench_read_primitives,
    bench_read_batch_size
);
criterion_main!(benches);
