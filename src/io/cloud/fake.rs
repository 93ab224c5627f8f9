//! Fake object store for testing.
//!
//! [`FakeObjectIO`] keeps buckets in memory and behaves like S3 where the connector can tell the
//! difference: buckets must exist before use, listings are sorted, and a missing key is a
//! `NotFound` error. Clones share the same storage, so a test can keep one handle to inspect
//! state while the connector owns another.

use crate::io::cloud::traits::{CloudIOError, CloudResult, ErrorKind, ObjectIO};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// Type aliases for complex nested types
type BucketStorage = Arc<Mutex<HashMap<String, BTreeMap<String, Vec<u8>>>>>;
type FailureSlot = Arc<Mutex<Option<ErrorKind>>>;

#[derive(Clone, Default)]
pub struct FakeObjectIO {
    storage: BucketStorage,
    puts: Arc<AtomicUsize>,
    failure: FailureSlot,
}

impl FakeObjectIO {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds one empty bucket.
    #[must_use]
    pub fn with_bucket(bucket: &str) -> Self {
        let store = Self::new();
        store.create_bucket(bucket);
        store
    }

    /// Create a bucket. Creating an existing bucket leaves its contents alone.
    ///
    /// # Panics
    ///
    /// Panics if the mutex protecting the storage is poisoned.
    pub fn create_bucket(&self, bucket: &str) {
        self.storage
            .lock()
            .expect("storage mutex poisoned")
            .entry(bucket.to_string())
            .or_default();
    }

    /// Number of successful `put_object` calls across all clones.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Make every following call fail with `kind` until [`clear_failure`](Self::clear_failure).
    ///
    /// # Panics
    ///
    /// Panics if the mutex protecting the failure slot is poisoned.
    pub fn fail_with(&self, kind: ErrorKind) {
        *self.failure.lock().expect("failure mutex poisoned") = Some(kind);
    }

    /// # Panics
    ///
    /// Panics if the mutex protecting the failure slot is poisoned.
    pub fn clear_failure(&self) {
        *self.failure.lock().expect("failure mutex poisoned") = None;
    }

    fn check_failure(&self, op: &str) -> CloudResult<()> {
        match *self.failure.lock().expect("failure mutex poisoned") {
            Some(kind) => Err(CloudIOError::new(kind, format!("injected failure in {op}"))),
            None => Ok(()),
        }
    }
}

fn no_such_bucket(bucket: &str) -> CloudIOError {
    CloudIOError::new(ErrorKind::NotFound, format!("Bucket {bucket} not found"))
}

impl ObjectIO for FakeObjectIO {
    fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> CloudResult<()> {
        self.check_failure("put_object")?;
        self.storage
            .lock()
            .expect("storage mutex poisoned")
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?
            .insert(key.to_string(), data.to_vec());
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn get_object(&self, bucket: &str, key: &str) -> CloudResult<Vec<u8>> {
        self.check_failure("get_object")?;
        let storage = self.storage.lock().expect("storage mutex poisoned");
        storage
            .get(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?
            .get(key)
            .cloned()
            .ok_or_else(|| {
                CloudIOError::new(
                    ErrorKind::NotFound,
                    format!("Object {bucket}/{key} not found"),
                )
            })
    }

    fn delete_object(&self, bucket: &str, key: &str) -> CloudResult<()> {
        self.check_failure("delete_object")?;
        if let Some(bucket_map) = self
            .storage
            .lock()
            .expect("storage mutex poisoned")
            .get_mut(bucket)
        {
            bucket_map.remove(key);
        }
        Ok(())
    }

    fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> CloudResult<Vec<String>> {
        self.check_failure("list_objects")?;
        let storage = self.storage.lock().expect("storage mutex poisoned");
        let bucket_map = storage.get(bucket).ok_or_else(|| no_such_bucket(bucket))?;

        // BTreeMap iteration is already in key order.
        Ok(bucket_map
            .keys()
            .filter(|key| prefix.is_none_or(|p| key.starts_with(p)))
            .cloned()
            .collect())
    }

    fn object_exists(&self, bucket: &str, key: &str) -> CloudResult<bool> {
        self.check_failure("object_exists")?;
        let storage = self.storage.lock().expect("storage mutex poisoned");
        Ok(storage.get(bucket).is_some_and(|b| b.contains_key(key)))
    }
}
