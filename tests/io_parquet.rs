use anyhow::Result;
use std::sync::Arc;
use xetra::io::parquet::{read_parquet_table, write_parquet_table};
use xetra::testing::{XetraRecord, assert_tables_equal, sample_report_records, sample_report_table};
use xetra::{Column, ColumnData, Table, Value};

use arrow::array::{ArrayRef, Date32Array, Int32Array, LargeStringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

#[test]
fn typed_columns_with_nulls_round_trip() -> Result<()> {
    let table = Table::new(vec![
        Column::new("name", ColumnData::Utf8(vec![Some("a".into()), None, Some(String::new())])),
        Column::new("n", ColumnData::Int64(vec![Some(-1), Some(i64::MAX), None])),
        Column::new("x", ColumnData::Float64(vec![None, Some(0.25), Some(-3.5)])),
        Column::new("ok", ColumnData::Boolean(vec![Some(true), Some(false), None])),
    ])?;

    let bytes = write_parquet_table(&table)?;
    let back = read_parquet_table(bytes)?;

    assert_tables_equal(&back, &table);
    // Parquet keeps empty strings apart from nulls.
    assert_eq!(back.value(2, "name"), Some(Value::Utf8(String::new())));
    assert_eq!(back.value(1, "name"), Some(Value::Null));
    Ok(())
}

#[test]
fn zero_row_table_keeps_schema() -> Result<()> {
    let table = Table::new(vec![
        Column::new("a", ColumnData::Utf8(Vec::new())),
        Column::new("b", ColumnData::Int64(Vec::new())),
    ])?;

    let back = read_parquet_table(write_parquet_table(&table)?)?;
    assert_eq!(back.num_rows(), 0);
    assert_tables_equal(&back, &table);
    Ok(())
}

#[test]
fn report_records_survive_parquet() -> Result<()> {
    let table = sample_report_table()?;

    let back = read_parquet_table(write_parquet_table(&table)?)?;
    let records: Vec<XetraRecord> = back.to_records()?;
    assert_eq!(records, sample_report_records());
    Ok(())
}

#[test]
fn foreign_types_are_widened_on_read() -> Result<()> {
    // A file written by another producer, with types the table model folds together.
    let schema = Arc::new(Schema::new(vec![
        Field::new("day", DataType::Date32, true),
        Field::new("count", DataType::Int32, false),
        Field::new("isin", DataType::LargeUtf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Date32Array::from(vec![Some(19357), None])),
        Arc::new(Int32Array::from(vec![7, 8])),
        Arc::new(LargeStringArray::from(vec![Some("DE000A0D6554"), None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    let table = read_parquet_table(buf)?;
    assert_eq!(table.value(0, "day"), Some(Value::Utf8("2022-12-31".into())));
    assert_eq!(table.value(1, "day"), Some(Value::Null));
    assert_eq!(table.value(1, "count"), Some(Value::Int64(8)));
    assert_eq!(table.value(0, "isin"), Some(Value::Utf8("DE000A0D6554".into())));
    Ok(())
}

#[test]
fn garbage_bytes_are_rejected() {
    assert!(read_parquet_table(b"col1,col2\nA,B\n".to_vec()).is_err());
}
