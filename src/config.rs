//! Job configuration.
//!
//! Loaded from a YAML file such as `configs/xetra_report1_config.yml`:
//!
//! ```yaml
//! logging:
//!   level: info
//!
//! s3:
//!   access_key: AWS_ACCESS_KEY_ID
//!   secret_key: AWS_SECRET_ACCESS_KEY
//!   src_endpoint_url: https://s3.eu-central-1.amazonaws.com
//!   src_bucket: deutsche-boerse-xetra-pds
//!   trg_endpoint_url: https://s3.eu-central-1.amazonaws.com
//!   trg_bucket: xetra-report
//! ```
//!
//! `access_key` and `secret_key` name the environment variables that hold the credentials.
//! They are resolved by the binary and passed to the connectors as values.

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[cfg(feature = "s3")]
use crate::connector::{BucketConnector, S3BucketConnector};
#[cfg(feature = "s3")]
use crate::io::cloud::{S3Credentials, S3ObjectIO};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Logging setup; required.
    pub logging: LoggingConfig,

    /// Source and target buckets.
    #[serde(default)]
    pub s3: Option<S3Config>,
}

/// Source and target storage locations.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct S3Config {
    /// Environment variable holding the access key id.
    #[serde(default = "default_access_key")]
    pub access_key: String,

    /// Environment variable holding the secret access key.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    pub src_endpoint_url: String,
    pub src_bucket: String,
    pub trg_endpoint_url: String,
    pub trg_bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Address buckets as `endpoint/bucket` (MinIO and other S3-compatible stores).
    #[serde(default)]
    pub force_path_style: bool,
}

// Default value functions (used by serde)

fn default_access_key() -> String {
    "AWS_ACCESS_KEY_ID".to_string()
}

fn default_secret_key() -> String {
    "AWS_SECRET_ACCESS_KEY".to_string()
}

fn default_region() -> String {
    "eu-central-1".to_string()
}

impl AppConfig {
    /// Parse a YAML document.
    ///
    /// # Errors
    /// Returns [`Error::Yaml`] if the document is malformed or has no `logging` section.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML file.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the file cannot be read, or see
    /// [`from_yaml_str`](Self::from_yaml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml_str(&yaml)
    }
}

#[cfg(feature = "s3")]
impl S3Config {
    /// Look up the credentials through `lookup`, by the variable names in this config.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first variable `lookup` cannot resolve.
    pub fn credentials_from<F>(&self, lookup: F) -> Result<S3Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |name: &str| {
            lookup(name).ok_or_else(|| Error::Config(format!("{name} is not set")))
        };
        Ok(S3Credentials::new(resolve(&self.access_key)?, resolve(&self.secret_key)?)
            .with_region(self.region.clone()))
    }

    /// Connector for the source bucket.
    ///
    /// # Errors
    /// Returns an error if the S3 client cannot be built.
    pub fn source_connector(&self, credentials: &S3Credentials) -> Result<S3BucketConnector> {
        self.connector(credentials, &self.src_endpoint_url, &self.src_bucket)
    }

    /// Connector for the target bucket.
    ///
    /// # Errors
    /// Returns an error if the S3 client cannot be built.
    pub fn target_connector(&self, credentials: &S3Credentials) -> Result<S3BucketConnector> {
        self.connector(credentials, &self.trg_endpoint_url, &self.trg_bucket)
    }

    fn connector(
        &self,
        credentials: &S3Credentials,
        endpoint_url: &str,
        bucket: &str,
    ) -> Result<S3BucketConnector> {
        let store = S3ObjectIO::new(credentials, endpoint_url, self.force_path_style)?;
        Ok(BucketConnector::with_store(store, endpoint_url, bucket))
    }
}
