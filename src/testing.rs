//! Testing utilities for code built on the connector.
//!
//! - **Fixtures**: a small Xetra report as CSV text, typed rows and a [`Table`](crate::Table)
//! - **Assertions**: table comparison with a readable diff
//! - **Log capture**: collect formatted `tracing` output for the current thread
//!
//! # Quick Start
//!
//! ```
//! use xetra::io::cloud::FakeObjectIO;
//! use xetra::testing::*;
//! use xetra::BucketConnector;
//!
//! # fn main() -> xetra::Result<()> {
//! let conn = BucketConnector::with_store(FakeObjectIO::with_bucket("b"), "http://fake", "b");
//! let logs = LogCapture::new();
//! let _guard = logs.install();
//!
//! conn.write_table_to_object(&sample_report_table()?, "report.csv", "csv")?;
//! assert!(logs.contains("Writing file to http://fake/b/report.csv"));
//! # Ok(())
//! # }
//! ```

mod assertions;
mod fixtures;
mod logs;

pub use assertions::*;
pub use fixtures::*;
pub use logs::*;
