//! Error types for the Xetra job.
//!
//! Two kinds are application errors: [`Error::UnsupportedFormat`] is raised when a table is
//! written in a format other than CSV or Parquet, and [`Error::InvalidMetadataFile`] is reserved
//! for a malformed metadata/tracking file. Every other variant wraps an infrastructure failure
//! transparently, so the caller sees the underlying message unchanged.

use crate::io::cloud::CloudIOError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The requested output format is not one of `csv` or `parquet`.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A metadata file does not have the expected layout. Nothing raises this yet.
    #[error("invalid metadata file: {0}")]
    InvalidMetadataFile(String),

    /// Columns of a table disagree in length, or a lookup named a missing column.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Storage(#[from] CloudIOError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Serde(#[from] serde_arrow::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The storage error behind this failure, if it came from the object store.
    #[must_use]
    pub fn as_storage(&self) -> Option<&CloudIOError> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}
