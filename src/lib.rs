//! # Xetra
//!
//! A small extract-transform-load job for Deutsche Börse Xetra trading reports, built around a
//! connector that moves tables between memory and an object-storage bucket.
//!
//! ## Key Features
//!
//! - **Bucket connector** - list keys under a prefix, read CSV objects, write CSV or Parquet
//! - **Typed tables** - named columns of text, integers, floats or booleans, with null support
//! - **Pluggable storage** - a synchronous [`ObjectIO`] trait with S3 and in-memory backends
//! - **Configuration** - one YAML file for logging and bucket locations
//!
//! ## Quick Start
//!
//! ```
//! use xetra::io::cloud::FakeObjectIO;
//! use xetra::{BucketConnector, Table};
//!
//! # fn main() -> xetra::Result<()> {
//! let store = FakeObjectIO::with_bucket("xetra-report");
//! let conn = BucketConnector::with_store(store, "https://s3.eu-central-1.amazonaws.com", "xetra-report");
//!
//! let table = Table::from_string_rows(&["col1", "col2"], &[["A", "B"], ["D", "C"]])?;
//! assert!(conn.write_table_to_object(&table, "test.csv", "csv")?);
//!
//! let back = conn.read_object_as_table("test.csv")?;
//! assert_eq!(back, table);
//! assert_eq!(conn.list_files_in_prefix("test")?, vec!["test.csv"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`Result<T>`] with the crate [`Error`]. Asking for an
//! output format other than CSV or Parquet is [`Error::UnsupportedFormat`]; storage failures
//! arrive as [`Error::Storage`] with the backend's [`CloudIOError`] untouched.
//!
//! ## Feature Flags
//!
//! - `s3` (default) - [`S3ObjectIO`](io::cloud::S3ObjectIO) and [`S3BucketConnector`], built on
//!   the AWS SDK

pub mod config;
pub mod connector;
pub mod error;
pub mod io;
pub mod logging;
pub mod table;
pub mod testing;

pub use config::{AppConfig, S3Config};
pub use connector::BucketConnector;
#[cfg(feature = "s3")]
pub use connector::S3BucketConnector;
pub use error::{Error, Result};
pub use io::FileFormat;
pub use io::cloud::{CloudIOError, ErrorKind, ObjectIO};
pub use logging::{LogFormat, LogWriter, LoggingConfig};
pub use table::{Column, ColumnData, Table, Value};
