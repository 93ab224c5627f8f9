//! Bucket connector: tables in, tables out.
//!
//! [`BucketConnector`] binds an [`ObjectIO`] store to one bucket and moves [`Table`]s between
//! memory and that bucket:
//!
//! - [`list_files_in_prefix`](BucketConnector::list_files_in_prefix) lists keys under a prefix.
//! - [`read_object_as_table`](BucketConnector::read_object_as_table) parses a CSV object.
//! - [`write_table_to_object`](BucketConnector::write_table_to_object) writes CSV or Parquet.
//!
//! Storage failures are returned as [`Error::Storage`](crate::Error::Storage) carrying the
//! backend's error unchanged; the connector never retries. The only error it creates itself is
//! [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat).

use crate::error::Result;
use crate::io::FileFormat;
use crate::io::cloud::ObjectIO;
use crate::io::csv::{CsvOptions, read_csv_table, write_csv_table};
use crate::io::parquet::{read_parquet_table, write_parquet_table};
use crate::table::Table;
use tracing::{error, info};

#[cfg(feature = "s3")]
use crate::io::cloud::{S3Credentials, S3ObjectIO};

/// A connector over the AWS SDK.
#[cfg(feature = "s3")]
pub type S3BucketConnector = BucketConnector<S3ObjectIO>;

/// Reads and writes tables in one bucket of an [`ObjectIO`] store.
pub struct BucketConnector<S: ObjectIO> {
    store: S,
    endpoint_url: String,
    bucket: String,
}

#[cfg(feature = "s3")]
impl BucketConnector<S3ObjectIO> {
    /// Connect to `bucket` at `endpoint_url` with static credentials.
    ///
    /// No request is made until the first operation.
    ///
    /// # Errors
    /// Returns an error if the S3 client cannot be built.
    pub fn new(
        credentials: &S3Credentials,
        endpoint_url: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Self> {
        let endpoint_url = endpoint_url.into();
        let store = S3ObjectIO::new(credentials, &endpoint_url, false)?;
        Ok(Self::with_store(store, endpoint_url, bucket))
    }
}

impl<S: ObjectIO> BucketConnector<S> {
    /// Bind an existing store to a bucket. `endpoint_url` is only used to name locations in
    /// log lines.
    pub fn with_store(store: S, endpoint_url: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            endpoint_url: endpoint_url.into(),
            bucket: bucket.into(),
        }
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fully qualified location of `key`: `{endpoint}/{bucket}/{key}`.
    #[must_use]
    pub fn location(&self, key: &str) -> String {
        format!(
            "{}/{}/{key}",
            self.endpoint_url.trim_end_matches('/'),
            self.bucket
        )
    }

    /// Keys starting with `prefix`, in key order. An empty prefix lists the whole bucket.
    ///
    /// A prefix that matches nothing gives an empty vector.
    ///
    /// # Errors
    /// Returns the storage error if the listing fails.
    pub fn list_files_in_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self.store.list_objects(&self.bucket, Some(prefix))?)
    }

    /// Read a comma-separated CSV object with a header row.
    ///
    /// # Errors
    /// Returns the storage error if the object cannot be fetched (`NotFound` for a missing
    /// key), or a decoding error if it is not UTF-8 CSV.
    pub fn read_object_as_table(&self, key: &str) -> Result<Table> {
        self.read_object_as_table_with(key, &CsvOptions::default())
    }

    /// Read a CSV object with explicit parsing options.
    ///
    /// # Errors
    /// See [`read_object_as_table`](Self::read_object_as_table).
    pub fn read_object_as_table_with(&self, key: &str, options: &CsvOptions) -> Result<Table> {
        info!(bucket = %self.bucket, key, "Reading file {}", self.location(key));
        let data = self.store.get_object(&self.bucket, key)?;
        read_csv_table(&data, options)
    }

    /// Read a Parquet object.
    ///
    /// # Errors
    /// Returns the storage error if the object cannot be fetched, or a decoding error if it is
    /// not Parquet.
    pub fn read_parquet_object_as_table(&self, key: &str) -> Result<Table> {
        info!(bucket = %self.bucket, key, "Reading file {}", self.location(key));
        let data = self.store.get_object(&self.bucket, key)?;
        read_parquet_table(data)
    }

    /// Write `table` to `key` as `format` (`"csv"` or `"parquet"`), replacing any existing object.
    ///
    /// Returns `Ok(false)` without touching storage when the table is empty; this check comes
    /// before the format is looked at. Returns `Ok(true)` once the object is uploaded.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat) for any other
    /// format, before anything is uploaded.
    /// Serialization and storage errors are returned as they are.
    pub fn write_table_to_object(&self, table: &Table, key: &str, format: &str) -> Result<bool> {
        if skip_empty(table) {
            return Ok(false);
        }
        let format = format.parse::<FileFormat>().inspect_err(|_| {
            error!("The file {format} format is not supported to be written to s3!");
        })?;
        self.put_table(table, key, format)
    }

    /// Typed variant of [`write_table_to_object`](Self::write_table_to_object).
    ///
    /// # Errors
    /// Serialization and storage errors are returned as they are.
    pub fn write_table(&self, table: &Table, key: &str, format: FileFormat) -> Result<bool> {
        if skip_empty(table) {
            return Ok(false);
        }
        self.put_table(table, key, format)
    }

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    /// Returns the storage error if the deletion fails.
    pub fn delete_object(&self, key: &str) -> Result<()> {
        self.store.delete_object(&self.bucket, key)?;
        Ok(())
    }

    fn put_table(&self, table: &Table, key: &str, format: FileFormat) -> Result<bool> {
        info!(bucket = %self.bucket, key, %format, "Writing file to {}", self.location(key));
        let data = match format {
            FileFormat::Csv => write_csv_table(table, &CsvOptions::default())?,
            FileFormat::Parquet => write_parquet_table(table)?,
        };
        self.store.put_object(&self.bucket, key, &data)?;
        Ok(true)
    }
}

fn skip_empty(table: &Table) -> bool {
    if table.is_empty() {
        info!("The table is empty. No file will be written!");
        return true;
    }
    false
}
