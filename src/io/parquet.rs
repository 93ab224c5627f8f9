//! Parquet codec for tables.
//!
//! Internally:
//! 1. The table becomes one Arrow `RecordBatch` ([`Table::to_record_batch`]).
//! 2. The batch is written with `parquet::arrow::ArrowWriter` into an in-memory buffer.
//!
//! Reading goes the other way with `ParquetRecordBatchReaderBuilder`, concatenating all
//! batches before converting back, so column order and types survive a round trip.

use crate::error::Result;
use crate::table::Table;
use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;

/// Encode a table as a Parquet file held in memory.
///
/// # Errors
/// Returns an error if the batch cannot be built or the writer fails.
pub fn write_parquet_table(table: &Table) -> Result<Vec<u8>> {
    let batch = table.to_record_batch()?;
    let props = WriterProperties::builder().build();
    let mut buf: Vec<u8> = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(buf)
}

/// Decode Parquet bytes into a table.
///
/// # Errors
/// Returns an error if the bytes are not a readable Parquet file, or a column has a type that
/// cannot be mapped onto a table column.
pub fn read_parquet_table(data: impl Into<Bytes>) -> Result<Table> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(data.into())?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;
    let batches = reader.collect::<std::result::Result<Vec<RecordBatch>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;
    Table::from_record_batch(&batch)
}
