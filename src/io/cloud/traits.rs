//! Core trait and types for object storage.
//!
//! The trait is synchronous; implementations backed by async SDKs block internally.

use thiserror::Error;

// ============================================================================
// Core Error Type
// ============================================================================

/// Error returned by an object store.
///
/// These are infrastructure failures. The connector passes them through untouched, so the
/// `kind` seen by a caller is the one the backend assigned.
#[derive(Debug, Clone, Error)]
#[error("{kind:?}: {message}")]
pub struct CloudIOError {
    pub message: String,
    pub kind: ErrorKind,
    /// Backend-specific detail (SDK error chain, HTTP status, ...).
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Authorization,
    NotFound,
    InvalidInput,
    Network,
    Timeout,
    ServiceUnavailable,
    RateLimited,
    InternalError,
    Other,
}

impl CloudIOError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

pub type CloudResult<T> = Result<T, CloudIOError>;

// ============================================================================
// ObjectIO - Object Storage
// ============================================================================

/// Trait for object storage operations
pub trait ObjectIO: Send + Sync {
    /// Upload data, replacing any object already stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket doesn't exist, permissions are not enough, or the upload fails
    fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> CloudResult<()>;

    /// Download an object's bytes
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the object doesn't exist, or another kind if the download fails
    fn get_object(&self, bucket: &str, key: &str) -> CloudResult<Vec<u8>>;

    /// Delete an object. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if permissions are not enough or the deletion fails
    fn delete_object(&self, bucket: &str, key: &str) -> CloudResult<()>;

    /// Keys starting with `prefix`, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket doesn't exist, permissions are not enough, or the listing fails
    fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> CloudResult<Vec<String>>;

    /// Check if an object exists
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket doesn't exist, permissions are not enough, or the check fails
    fn object_exists(&self, bucket: &str, key: &str) -> CloudResult<bool>;
}
