#![allow(dead_code)]

use bytes::Bytes;
use parquet::file::serialized_reader::SerializedFileReader;
use typed_parquet_dyn::{write_table, DynTable, WriteOptions};

pub fn write_bytes(table: &DynTable, options: &WriteOptions) -> Bytes {
    Bytes::from(write_table(table, Vec::new(), options).unwrap())
}

pub fn open(data: Bytes) -> SerializedFileReader<Bytes> {
    SerializedFileReader::new(data).unwrap()
}
