//! In-memory tables.
//!
//! A [`Table`] is a list of named, typed columns of equal length. It is the unit of data the
//! connector reads from and writes to object storage:
//!
//! - CSV objects decode with inferred column types (see [`crate::io::csv`]).
//! - Parquet objects keep their column types (see [`crate::io::parquet`]).
//! - Typed rows can be turned into a table and back with [`Table::from_records`] and
//!   [`Table::to_records`], using the same `serde_arrow` mapping as the Parquet codec.

use crate::error::{Error, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, FieldRef, Float64Type, Int64Type, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};
use std::fmt;
use std::sync::Arc;

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Utf8(String),
    Int64(i64),
    Float64(f64),
    Boolean(bool),
}

impl fmt::Display for Value {
    /// Nulls render as an empty string, which is also how CSV stores them. Floats always carry
    /// a decimal point or exponent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Utf8(v) => f.write_str(v),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v:?}"),
            Self::Boolean(v) => write!(f, "{v}"),
        }
    }
}

/// The values of one column. Every element may be null.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Utf8(Vec<Option<String>>),
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
}

impl ColumnData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Utf8(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::Boolean(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `row`, or `None` if `row` is out of bounds.
    #[must_use]
    pub fn value(&self, row: usize) -> Option<Value> {
        let value = match self {
            Self::Utf8(v) => v.get(row)?.clone().map_or(Value::Null, Value::Utf8),
            Self::Int64(v) => v.get(row)?.map_or(Value::Null, Value::Int64),
            Self::Float64(v) => v.get(row)?.map_or(Value::Null, Value::Float64),
            Self::Boolean(v) => v.get(row)?.map_or(Value::Null, Value::Boolean),
        };
        Some(value)
    }

    /// The Arrow type this column is stored as in Parquet.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Utf8(_) => DataType::Utf8,
            Self::Int64(_) => DataType::Int64,
            Self::Float64(_) => DataType::Float64,
            Self::Boolean(_) => DataType::Boolean,
        }
    }

    fn to_array(&self) -> ArrayRef {
        match self {
            Self::Utf8(v) => Arc::new(v.iter().map(Option::as_deref).collect::<StringArray>()),
            Self::Int64(v) => Arc::new(Int64Array::from(v.clone())),
            Self::Float64(v) => Arc::new(Float64Array::from(v.clone())),
            Self::Boolean(v) => Arc::new(BooleanArray::from(v.clone())),
        }
    }

    /// Map an Arrow array onto the closest column type.
    ///
    /// Integers widen to `Int64`, floats to `Float64`; anything else that is not boolean is
    /// cast to `Utf8` (dates, timestamps, decimals, large strings).
    fn from_array(array: &ArrayRef) -> Result<Self> {
        let data = match array.data_type() {
            DataType::Boolean => Self::Boolean(array.as_boolean().iter().collect()),
            dt if dt.is_integer() => {
                let widened = cast(array.as_ref(), &DataType::Int64)?;
                Self::Int64(widened.as_primitive::<Int64Type>().iter().collect())
            }
            dt if dt.is_floating() => {
                let widened = cast(array.as_ref(), &DataType::Float64)?;
                Self::Float64(widened.as_primitive::<Float64Type>().iter().collect())
            }
            _ => {
                let text = cast(array.as_ref(), &DataType::Utf8)?;
                Self::Utf8(
                    text.as_string::<i32>()
                        .iter()
                        .map(|v| v.map(str::to_owned))
                        .collect(),
                )
            }
        };
        Ok(data)
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// A text column without nulls.
    pub fn utf8<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ColumnData::Utf8(values.into_iter().map(|v| Some(v.into())).collect()),
        )
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }
}

/// Named columns with ordered rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Table {
    /// Build a table from columns, which must all have the same length.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTable`] if the column lengths differ.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, |c| c.data.len());
        if let Some(bad) = columns.iter().find(|c| c.data.len() != num_rows) {
            return Err(Error::InvalidTable(format!(
                "column '{}' has {} rows, expected {num_rows}",
                bad.name,
                bad.data.len()
            )));
        }
        Ok(Self { columns, num_rows })
    }

    /// A table with no columns and no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a text table from row-major data.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTable`] if a row does not have one value per column name.
    pub fn from_string_rows<N, R, S>(names: &[N], rows: &[R]) -> Result<Self>
    where
        N: AsRef<str>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut values: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(rows.len()); names.len()];
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != names.len() {
                return Err(Error::InvalidTable(format!(
                    "row #{} has {} values, expected {}",
                    i + 1,
                    row.len(),
                    names.len()
                )));
            }
            for (col, cell) in values.iter_mut().zip(row) {
                col.push(Some(cell.as_ref().to_owned()));
            }
        }
        let columns = names
            .iter()
            .zip(values)
            .map(|(name, data)| Column::new(name.as_ref(), ColumnData::Utf8(data)))
            .collect();
        Self::new(columns)
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// `true` when the table has no rows or no columns; such a table is never written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.columns.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// First column called `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cell at (`row`, `column`), or `None` if either is out of range.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<Value> {
        self.column(column)?.data.value(row)
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.num_rows).map(move |row| {
            self.columns
                .iter()
                .map(|c| c.data.value(row).unwrap_or(Value::Null))
                .collect()
        })
    }

    /// Convert into a single Arrow `RecordBatch`. Every field is nullable.
    ///
    /// # Errors
    /// Returns an error if Arrow rejects the batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|c| Field::new(c.name.as_str(), c.data.data_type(), true))
            .collect();
        let arrays: Vec<ArrayRef> = self.columns.iter().map(|c| c.data.to_array()).collect();
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows));
        let batch =
            RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
        Ok(batch)
    }

    /// Build a table from an Arrow `RecordBatch`, keeping column order.
    ///
    /// # Errors
    /// Returns an error if a column cannot be cast to a supported type.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Self> {
        let schema = batch.schema();
        let columns = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, array)| -> Result<Column> {
                Ok(Column::new(
                    field.name().as_str(),
                    ColumnData::from_array(array)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            columns,
            num_rows: batch.num_rows(),
        })
    }

    /// Build a table from typed rows.
    ///
    /// The schema is traced from `T`, so an empty slice still produces the columns.
    ///
    /// # Errors
    /// Returns an error if `T` cannot be mapped to Arrow, or a field has an unsupported type.
    pub fn from_records<T: Serialize + Deserialize<'static>>(records: &[T]) -> Result<Self> {
        let fields = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())?;
        let batch = serde_arrow::to_record_batch(&fields, &records)?;
        Self::from_record_batch(&batch)
    }

    /// Deserialize every row into `T`, matching struct fields to column names.
    ///
    /// # Errors
    /// Returns an error if a column is missing or has a type `T` cannot accept.
    pub fn to_records<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let batch = self.to_record_batch()?;
        let records: Vec<T> = serde_arrow::from_record_batch(&batch)?;
        Ok(records)
    }
}
