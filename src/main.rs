//! Entry point for the Xetra ETL job.
//!
//! Loads the YAML configuration named by `XETRA_CONFIG` (default
//! `configs/xetra_report1_config.yml`), installs logging from its `logging` section and, when an
//! `s3` section is present, builds the source and target connectors.

use anyhow::{Context, Result};
use std::env;
use tracing::info;
use xetra::AppConfig;

const CONFIG_ENV: &str = "XETRA_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "configs/xetra_report1_config.yml";

fn main() -> Result<()> {
    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::from_file(&config_path)
        .with_context(|| format!("load configuration {config_path}"))?;
    config.logging.init().context("configure logging")?;
    info!(config = %config_path, "Xetra ETL job started");

    #[cfg(feature = "s3")]
    if let Some(s3) = &config.s3 {
        let credentials = s3
            .credentials_from(|name| env::var(name).ok())
            .context("resolve S3 credentials")?;
        let source = s3
            .source_connector(&credentials)
            .context("connect to source bucket")?;
        let target = s3
            .target_connector(&credentials)
            .context("connect to target bucket")?;
        info!(
            source = %source.location(""),
            target = %target.location(""),
            "Connectors ready"
        );
    }

    info!("Xetra ETL job finished");
    Ok(())
}
