//! Object storage behind a synchronous trait.
//!
//! - [`ObjectIO`] - put/get/delete/list/exists against a bucket
//! - [`S3ObjectIO`] - Amazon S3 and S3-compatible stores (feature `s3`)
//! - [`FakeObjectIO`] - in-memory store for tests
//!
//! ## Unit Testing with Fakes
//! ```
//! use xetra::io::cloud::*;
//!
//! # fn main() -> CloudResult<()> {
//! let storage = FakeObjectIO::with_bucket("bucket");
//! storage.put_object("bucket", "prefix/key.csv", b"col1,col2\nval1,val2")?;
//!
//! assert!(storage.object_exists("bucket", "prefix/key.csv")?);
//! assert_eq!(storage.list_objects("bucket", Some("prefix/"))?.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`CloudResult<T>`] where the error is [`CloudIOError`], categorized by
//! [`ErrorKind`] (`NotFound`, `Authentication`, `Network`, ...).

pub mod fake;
#[cfg(feature = "s3")]
pub mod s3;
pub mod traits;

pub use fake::*;
#[cfg(feature = "s3")]
pub use s3::*;
pub use traits::*;
