//! Byte-level codecs for tables and the object-storage seam.
//!
//! - [`csv`] and [`parquet`] turn a [`Table`](crate::Table) into bytes and back.
//! - [`cloud`] defines [`ObjectIO`](cloud::ObjectIO) and its implementations.

pub mod cloud;
pub mod csv;
pub mod parquet;

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Output formats a table can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Csv,
    Parquet,
}

impl FileFormat {
    /// Conventional file extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    /// Case-insensitive; anything but `csv` or `parquet` is [`Error::UnsupportedFormat`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("csv".parse::<FileFormat>().unwrap(), FileFormat::Csv);
        assert_eq!("PARQUET".parse::<FileFormat>().unwrap(), FileFormat::Parquet);
        assert!(matches!(
            "xml".parse::<FileFormat>(),
            Err(Error::UnsupportedFormat(f)) if f == "xml"
        ));
        assert!(" csv".parse::<FileFormat>().is_err());
    }

    #[test]
    fn test_display_is_extension() {
        assert_eq!(FileFormat::Parquet.to_string(), "parquet");
        assert_eq!(FileFormat::Csv.extension(), "csv");
    }
}
