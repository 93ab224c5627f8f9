//! Amazon S3 (and S3-compatible) implementation of [`ObjectIO`].
//!
//! The AWS SDK is async; [`S3ObjectIO`] owns a current-thread Tokio runtime and blocks on each
//! request, so callers get the same synchronous interface as every other backend.
//!
//! Credentials are passed in explicitly. Nothing here reads the process environment or the
//! shared AWS config files.

use crate::io::cloud::traits::{CloudIOError, CloudResult, ErrorKind, ObjectIO};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use std::fmt;
use tokio::runtime::{Builder, Runtime};

/// Region used when none is configured. S3 accepts any region for path-style custom endpoints.
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Static access credentials for an S3 endpoint.
#[derive(Clone)]
pub struct S3Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl S3Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: DEFAULT_REGION.to_string(),
        }
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

// Keep the secret out of logs.
impl fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("region", &self.region)
            .finish()
    }
}

/// Blocking S3 client.
pub struct S3ObjectIO {
    client: Client,
    runtime: Runtime,
}

impl S3ObjectIO {
    /// Build a client for `endpoint_url`.
    ///
    /// `force_path_style` addresses buckets as `endpoint/bucket/key`, which S3-compatible
    /// stores (MinIO, LocalStack) usually require.
    ///
    /// # Errors
    /// Returns an `InternalError` if the Tokio runtime cannot be started.
    pub fn new(
        credentials: &S3Credentials,
        endpoint_url: &str,
        force_path_style: bool,
    ) -> CloudResult<Self> {
        let creds = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "xetra-static",
        );
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .credentials_provider(creds)
            .region(Region::new(credentials.region.clone()))
            .endpoint_url(endpoint_url)
            .force_path_style(force_path_style)
            .build();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                CloudIOError::new(ErrorKind::InternalError, "failed to start Tokio runtime")
                    .with_detail(e.to_string())
            })?;
        Ok(Self {
            client: Client::from_conf(config),
            runtime,
        })
    }
}

/// Map an SDK failure onto an [`ErrorKind`].
fn classify<E, R>(op: &str, target: &str, err: SdkError<E, R>) -> CloudIOError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: fmt::Debug,
{
    let kind = match &err {
        SdkError::TimeoutError(_) => ErrorKind::Timeout,
        SdkError::DispatchFailure(_) => ErrorKind::Network,
        SdkError::ConstructionFailure(_) => ErrorKind::InvalidInput,
        _ => match err.code() {
            Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => ErrorKind::NotFound,
            Some("AccessDenied" | "AllAccessDisabled") => ErrorKind::Authorization,
            Some(
                "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "ExpiredToken" | "InvalidToken",
            ) => ErrorKind::Authentication,
            Some("SlowDown" | "Throttling" | "TooManyRequests") => ErrorKind::RateLimited,
            Some("ServiceUnavailable") => ErrorKind::ServiceUnavailable,
            Some("InternalError") => ErrorKind::InternalError,
            Some("InvalidArgument" | "InvalidBucketName" | "KeyTooLongError") => {
                ErrorKind::InvalidInput
            }
            _ => ErrorKind::Other,
        },
    };
    let message = match err.message() {
        Some(m) => format!("{op} failed for {target}: {m}"),
        None => format!("{op} failed for {target}"),
    };
    CloudIOError::new(kind, message).with_detail(DisplayErrorContext(&err).to_string())
}

impl ObjectIO for S3ObjectIO {
    fn put_object(&self, bucket: &str, key: &str, data: &[u8]) -> CloudResult<()> {
        self.runtime
            .block_on(
                self.client
                    .put_object()
                    .bucket(bucket)
                    .key(key)
                    .body(ByteStream::from(data.to_vec()))
                    .send(),
            )
            .map_err(|e| classify("put_object", &format!("{bucket}/{key}"), e))?;
        Ok(())
    }

    fn get_object(&self, bucket: &str, key: &str) -> CloudResult<Vec<u8>> {
        self.runtime.block_on(async {
            let resp = self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| classify("get_object", &format!("{bucket}/{key}"), e))?;
            let body = resp.body.collect().await.map_err(|e| {
                CloudIOError::new(
                    ErrorKind::Network,
                    format!("reading body of {bucket}/{key} failed"),
                )
                .with_detail(e.to_string())
            })?;
            Ok(body.into_bytes().to_vec())
        })
    }

    fn delete_object(&self, bucket: &str, key: &str) -> CloudResult<()> {
        self.runtime
            .block_on(self.client.delete_object().bucket(bucket).key(key).send())
            .map_err(|e| classify("delete_object", &format!("{bucket}/{key}"), e))?;
        Ok(())
    }

    fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> CloudResult<Vec<String>> {
        self.runtime.block_on(async {
            let mut keys = Vec::new();
            let mut continuation_token: Option<String> = None;
            loop {
                let mut req = self
                    .client
                    .list_objects_v2()
                    .bucket(bucket)
                    .set_prefix(prefix.map(str::to_string));
                if let Some(token) = continuation_token.take() {
                    req = req.continuation_token(token);
                }
                let resp = req
                    .send()
                    .await
                    .map_err(|e| classify("list_objects", bucket, e))?;
                keys.extend(
                    resp.contents()
                        .iter()
                        .filter_map(|obj| obj.key().map(str::to_string)),
                );
                continuation_token = resp.next_continuation_token().map(str::to_string);
                if continuation_token.is_none() {
                    break;
                }
            }
            // Not every S3-compatible store lists in key order.
            keys.sort();
            Ok(keys)
        })
    }

    fn object_exists(&self, bucket: &str, key: &str) -> CloudResult<bool> {
        let result = self
            .runtime
            .block_on(self.client.head_object().bucket(bucket).key(key).send());
        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(e)) if e.err().is_not_found() => Ok(false),
            Err(e) => Err(classify("object_exists", &format!("{bucket}/{key}"), e)),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::get_object::GetObjectError;

    fn service_error(code: &str) -> SdkError<GetObjectError, ()> {
        let meta = ErrorMetadata::builder().code(code).message("from S3").build();
        SdkError::service_error(GetObjectError::generic(meta), ())
    }

    #[test]
    fn test_classify_missing_key_and_bucket() {
        for code in ["NoSuchKey", "NoSuchBucket", "NotFound"] {
            let err = classify("get_object", "b/k.csv", service_error(code));
            assert_eq!(err.kind, ErrorKind::NotFound, "code {code}");
            assert!(err.is_not_found());
        }
    }

    #[test]
    fn test_classify_service_codes() {
        let cases = [
            ("AccessDenied", ErrorKind::Authorization),
            ("InvalidAccessKeyId", ErrorKind::Authentication),
            ("SignatureDoesNotMatch", ErrorKind::Authentication),
            ("SlowDown", ErrorKind::RateLimited),
            ("ServiceUnavailable", ErrorKind::ServiceUnavailable),
            ("InternalError", ErrorKind::InternalError),
            ("InvalidBucketName", ErrorKind::InvalidInput),
            ("SomethingNew", ErrorKind::Other),
        ];
        for (code, kind) in cases {
            assert_eq!(classify("get_object", "b/k", service_error(code)).kind, kind, "code {code}");
        }
    }

    #[test]
    fn test_classify_message_names_operation_and_target() {
        let err = classify("get_object", "b/k.csv", service_error("NoSuchKey"));
        assert_eq!(err.message, "get_object failed for b/k.csv: from S3");
        assert!(err.detail.is_some());
    }

    #[test]
    fn test_classify_timeout() {
        let err: SdkError<GetObjectError, ()> = SdkError::timeout_error("read timed out");
        let classified = classify("get_object", "b/k.csv", err);
        assert_eq!(classified.kind, ErrorKind::Timeout);
        assert_eq!(classified.message, "get_object failed for b/k.csv");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = S3Credentials::new("id", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("id"));
        assert!(!debug.contains("hunter2"));
        assert_eq!(creds.region, DEFAULT_REGION);
    }
}
