use std::sync::Arc;

use bytes::Bytes;
use typed_parquet::{
    bridge::LogicalElement,
    parquet::{
        basic::Repetition,
        file::{
            properties::WriterProperties,
            reader::FileReader,
            serialized_reader::SerializedFileReader,
            writer::SerializedFileWriter,
        },
        schema::types::Type,
    },
    schema::{ElementType, StorageType, TimeUnit},
    Date, Decimal, Error, LogicalColumnReader, LogicalColumnWriter, Millisecond, Time,
    TypedBatch,
};
use uuid::Uuid;

fn write_column<E: LogicalElement>(
    element: &ElementType,
    nullable: bool,
    batches: &[&[E]],
) -> Bytes {
    let storage = StorageType::for_element("c", element, None).unwrap();
    let repetition = if nullable {
        Repetition::OPTIONAL
    } else {
        Repetition::REQUIRED
    };
    let field = storage.to_parquet_type("c", repetition).unwrap();
    let schema = Type::group_type_builder("schema")
        .with_fields(vec![field])
        .build()
        .unwrap();
    let props = Arc::new(WriterProperties::builder().build());
    let mut writer = SerializedFileWriter::new(Vec::new(), Arc::new(schema), props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();
    let column = row_group.next_column().unwrap().unwrap();
    let mut column = LogicalColumnWriter::<E>::try_new(column).unwrap();
    for batch in batches {
        column.write_batch(batch).unwrap();
    }
    column.close().unwrap();
    row_group.close().unwrap();
    Bytes::from(writer.into_inner().unwrap())
}

fn open_column<E: LogicalElement>(
    data: Bytes,
    buffer_length: usize,
) -> Result<LogicalColumnReader<E>, Error> {
    let reader = SerializedFileReader::new(data)?;
    let row_group = reader.get_row_group(0)?;
    let descr = row_group.metadata().column(0).column_descr_ptr();
    let num_rows = row_group.metadata().num_rows() as usize;
    LogicalColumnReader::try_new(
        row_group.get_column_reader(0)?,
        descr,
        num_rows,
        buffer_length,
    )
}

fn drain<E: LogicalElement>(stream: &mut LogicalColumnReader<E>) -> (Vec<E>, Vec<usize>) {
    let mut batch = TypedBatch::with_capacity(stream.buffer_length());
    let mut all = Vec::new();
    let mut sizes = Vec::new();
    while stream.has_next() {
        let n = stream.read_batch(&mut batch).unwrap();
        assert_eq!(n, batch.len());
        sizes.push(n);
        all.extend(batch.iter().cloned());
    }
    (all, sizes)
}

#[test]
fn nullable_int32_keeps_nulls_in_place() {
    let values = [Some(0), None, Some(2), None, Some(4)];
    let data = write_column::<Option<i32>>(&ElementType::Int32, true, &[&values]);
    let mut stream = open_column::<Option<i32>>(data, 2).unwrap();
    assert_eq!(stream.element_type(), &ElementType::Int32);
    let (read, sizes) = drain(&mut stream);
    assert_eq!(read, values);
    assert_eq!(sizes, vec![2, 2, 1]);
    assert!(!stream.has_next());
}

#[test]
fn exhausted_stream_reads_nothing() {
    let data = write_column::<i64>(&ElementType::Int64, false, &[&[1, 2, 3]]);
    let mut stream = open_column::<i64>(data, 16).unwrap();
    let (read, sizes) = drain(&mut stream);
    assert_eq!(read, vec![1, 2, 3]);
    assert_eq!(sizes, vec![3]);
    let mut batch = TypedBatch::with_capacity(4);
    assert_eq!(stream.read_batch(&mut batch).unwrap(), 0);
    assert!(batch.is_empty());
}

#[test]
fn nullable_shape_reads_required_column() {
    let data = write_column::<String>(&ElementType::Utf8, false, &[&["a".into(), "".into()]]);
    let mut stream = open_column::<Option<String>>(data, 8).unwrap();
    let (read, _) = drain(&mut stream);
    assert_eq!(read, vec![Some("a".to_string()), Some(String::new())]);
}

#[test]
fn required_shape_rejects_nulls() {
    let data = write_column::<Option<i32>>(&ElementType::Int32, true, &[&[Some(1), None]]);
    let mut stream = open_column::<i32>(data, 8).unwrap();
    let mut batch = TypedBatch::with_capacity(8);
    let err = stream.read_batch(&mut batch).unwrap_err();
    assert!(matches!(err, Error::UnexpectedNull { index: 1, .. }));
}

#[test]
fn physical_type_mismatch_is_reported() {
    let data = write_column::<i32>(&ElementType::Int32, false, &[&[1]]);
    let err = open_column::<i64>(data, 8).err().unwrap();
    assert!(matches!(err, Error::TypeMismatch { ref column, .. } if column == "c"));
}

#[test]
fn writer_rejects_null_in_required_column() {
    let storage = StorageType::for_element("c", &ElementType::Int32, None).unwrap();
    let field = storage.to_parquet_type("c", Repetition::REQUIRED).unwrap();
    let schema = Type::group_type_builder("schema")
        .with_fields(vec![field])
        .build()
        .unwrap();
    let props = Arc::new(WriterProperties::builder().build());
    let mut writer = SerializedFileWriter::new(Vec::new(), Arc::new(schema), props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();
    let column = row_group.next_column().unwrap().unwrap();
    let mut column = LogicalColumnWriter::<Option<i32>>::try_new(column).unwrap();
    let err = column.write_batch(&[Some(1), None]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedNull { index: 1, .. }));
}

#[test]
fn logical_types_round_trip() {
    let decimal = ElementType::Decimal {
        precision: 29,
        scale: 3,
    };
    let values = [
        Some(Decimal::new(-123_456)),
        None,
        Some(Decimal::new(99_999_999_999_999_999_999_999_999)),
    ];
    let data = write_column::<Option<Decimal>>(&decimal, true, &[&values]);
    let mut stream = open_column::<Option<Decimal>>(data, 2).unwrap();
    assert_eq!(stream.element_type(), &decimal);
    assert_eq!(drain(&mut stream).0, values);

    let times = [Time::<Millisecond>::new(0), Time::new(86_399_999)];
    let element = ElementType::Time {
        unit: TimeUnit::Millis,
        utc_adjusted: true,
    };
    let data = write_column(&element, false, &[&times[..1], &times[1..]]);
    let mut stream = open_column::<Time<Millisecond>>(data, 8).unwrap();
    assert_eq!(drain(&mut stream).0, times);

    let dates = [Date(-1), Date(19_000)];
    let data = write_column(&ElementType::Date, false, &[&dates]);
    let mut stream = open_column::<Date>(data, 1).unwrap();
    assert_eq!(drain(&mut stream), (dates.to_vec(), vec![1, 1]));

    let ids = [Some(Uuid::from_u128(42)), None];
    let data = write_column(&ElementType::Uuid, true, &[&ids]);
    let mut stream = open_column::<Option<Uuid>>(data, 8).unwrap();
    assert_eq!(stream.element_type(), &ElementType::Uuid);
    assert_eq!(drain(&mut stream).0, ids);
}

#[test]
fn typed_batch_is_bounded() {
    let mut batch = TypedBatch::with_capacity(2);
    assert!(batch.push(1).is_ok());
    assert!(batch.push(2).is_ok());
    assert_eq!(batch.push(3), Err(3));
    assert_eq!(batch.remaining(), 0);
    batch.clear();
    assert_eq!(batch.capacity(), 2);
    assert!(batch.is_empty());
}
