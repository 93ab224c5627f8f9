//! CSV codec for tables.
//!
//! - [`read_csv_table`] decodes UTF-8 bytes into a table, inferring column types.
//! - [`write_csv_table`] encodes a table with a header row and no index column.
//!
//! # Design notes
//! - A column is read as `Int64`, `Float64` or `Boolean` when every non-null cell parses as
//!   that type (tried in that order), otherwise as [`ColumnData::Utf8`]. All-null columns stay
//!   text. [`CsvOptions::with_type_inference`] turns this off.
//! - Floats are written with a decimal point (`2.0`), so they read back as floats.
//! - Nulls are written as empty fields, and empty fields are read as nulls.
//! - Rows must all have the header's width; a ragged file is a [`csv::Error`].

use crate::error::Result;
use crate::table::{Column, ColumnData, Table, Value};
use csv::{ReaderBuilder, WriterBuilder};

/// Options shared by the reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field separator.
    pub delimiter: u8,
    /// Whether the first row holds column names. Without one, columns are named `0`, `1`, ...
    pub has_headers: bool,
    /// Infer numeric and boolean columns on read. When off, every column is text.
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            infer_types: true,
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

/// Decode CSV bytes into a table.
///
/// Empty input gives [`Table::empty`]; a header without data rows gives the named columns with
/// zero rows.
///
/// # Errors
/// Returns an error if the bytes are not UTF-8 or a record cannot be parsed.
pub fn read_csv_table(data: &[u8], options: &CsvOptions) -> Result<Table> {
    let text = std::str::from_utf8(data)?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .from_reader(text.as_bytes());

    let mut names: Vec<String> = if options.has_headers {
        rdr.headers()?.iter().map(str::to_owned).collect()
    } else {
        Vec::new()
    };
    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];

    for rec in rdr.records() {
        let rec = rec?;
        if names.is_empty() && values.is_empty() {
            names = (0..rec.len()).map(|i| i.to_string()).collect();
            values = vec![Vec::new(); names.len()];
        }
        for (col, field) in values.iter_mut().zip(rec.iter()) {
            col.push((!field.is_empty()).then(|| field.to_owned()));
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, data)| {
            let data = if options.infer_types {
                infer_column(data)
            } else {
                ColumnData::Utf8(data)
            };
            Column::new(name, data)
        })
        .collect();
    Table::new(columns)
}

/// Narrowest column type every non-null cell parses as.
fn infer_column(cells: Vec<Option<String>>) -> ColumnData {
    if cells.iter().all(Option::is_none) {
        return ColumnData::Utf8(cells);
    }
    if let Some(ints) = parse_all(&cells, |s| s.parse::<i64>().ok()) {
        return ColumnData::Int64(ints);
    }
    if let Some(floats) = parse_all(&cells, |s| s.parse::<f64>().ok()) {
        return ColumnData::Float64(floats);
    }
    if let Some(bools) = parse_all(&cells, parse_bool) {
        return ColumnData::Boolean(bools);
    }
    ColumnData::Utf8(cells)
}

fn parse_all<T>(
    cells: &[Option<String>],
    parse: impl Fn(&str) -> Option<T>,
) -> Option<Vec<Option<T>>> {
    cells
        .iter()
        .map(|cell| match cell {
            Some(s) => parse(s).map(Some),
            None => Some(None),
        })
        .collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Encode a table as CSV: a header row, then one record per row.
///
/// A table without columns encodes to no bytes at all.
///
/// # Errors
/// Returns an error if a record cannot be written.
pub fn write_csv_table(table: &Table, options: &CsvOptions) -> Result<Vec<u8>> {
    if table.num_columns() == 0 {
        return Ok(Vec::new());
    }
    let mut wtr = WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .from_writer(Vec::new());
    if options.has_headers {
        wtr.write_record(table.column_names())?;
    }
    for row in table.rows() {
        wtr.write_record(row.iter().map(Value::to_string))?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}
