use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use xetra::{AppConfig, Error, LogFormat, LogWriter, LoggingConfig};

const FULL: &str = r"
logging:
  level: debug
  format: json
  writer: stdout
  directives:
    - aws_config=warn

s3:
  access_key: MY_KEY
  secret_key: MY_SECRET
  src_endpoint_url: https://s3.eu-central-1.amazonaws.com
  src_bucket: deutsche-boerse-xetra-pds
  trg_endpoint_url: http://localhost:9000
  trg_bucket: xetra-report
  region: us-east-1
  force_path_style: true
";

#[test]
fn parse_full_config() -> Result<()> {
    let config = AppConfig::from_yaml_str(FULL)?;

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.writer, LogWriter::Stdout);
    assert_eq!(config.logging.directives, vec!["aws_config=warn"]);

    let s3 = config.s3.expect("s3 section");
    assert_eq!(s3.access_key, "MY_KEY");
    assert_eq!(s3.src_bucket, "deutsche-boerse-xetra-pds");
    assert_eq!(s3.trg_endpoint_url, "http://localhost:9000");
    assert_eq!(s3.region, "us-east-1");
    assert!(s3.force_path_style);
    Ok(())
}

#[test]
fn defaults_fill_missing_fields() -> Result<()> {
    let config = AppConfig::from_yaml_str(
        "logging: {}\ns3:\n  src_endpoint_url: a\n  src_bucket: b\n  trg_endpoint_url: c\n  trg_bucket: d\n",
    )?;

    assert_eq!(config.logging, LoggingConfig::default());
    let s3 = config.s3.expect("s3 section");
    assert_eq!(s3.access_key, "AWS_ACCESS_KEY_ID");
    assert_eq!(s3.secret_key, "AWS_SECRET_ACCESS_KEY");
    assert_eq!(s3.region, "eu-central-1");
    assert!(!s3.force_path_style);
    Ok(())
}

#[test]
fn s3_section_is_optional() -> Result<()> {
    let config = AppConfig::from_yaml_str("logging:\n  level: warn\n")?;
    assert!(config.s3.is_none());
    Ok(())
}

#[test]
fn logging_section_is_required() {
    let err = AppConfig::from_yaml_str("s3: ~\n").unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
    assert!(err.to_string().contains("logging"));
}

#[test]
fn unknown_format_is_rejected() {
    let err = AppConfig::from_yaml_str("logging:\n  format: xml\n").unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

#[test]
fn load_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(FULL.as_bytes())?;

    let config = AppConfig::from_file(file.path())?;
    assert_eq!(config.logging.level, "debug");
    Ok(())
}

#[test]
fn shipped_job_config_parses() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/xetra_report1_config.yml");
    let config = AppConfig::from_file(path)?;

    let s3 = config.s3.expect("s3 section");
    assert_eq!(s3.src_bucket, "deutsche-boerse-xetra-pds");
    assert_eq!(s3.trg_bucket, "xetra-report");
    assert!(config.logging.env_filter().is_ok());
    Ok(())
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = AppConfig::from_file(dir.path().join("absent.yml")).unwrap_err();

    assert!(matches!(err, Error::Config(ref m) if m.starts_with("cannot read")));
}

#[test]
fn invalid_directive_is_a_config_error() {
    let logging = LoggingConfig {
        directives: vec!["xetra=loud".to_string()],
        ..LoggingConfig::default()
    };
    assert!(matches!(logging.env_filter(), Err(Error::Config(_))));
}

#[cfg(feature = "s3")]
mod s3 {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn credentials_are_resolved_by_name() -> Result<()> {
        let s3 = AppConfig::from_yaml_str(FULL)?.s3.expect("s3 section");
        let env: HashMap<&str, &str> = [("MY_KEY", "id"), ("MY_SECRET", "secret")].into();

        let creds = s3.credentials_from(|name| env.get(name).map(|v| (*v).to_string()))?;
        assert_eq!(creds.access_key_id, "id");
        assert_eq!(creds.secret_access_key, "secret");
        assert_eq!(creds.region, "us-east-1");
        assert!(!format!("{creds:?}").contains("\"secret\""));
        Ok(())
    }

    #[test]
    fn missing_credential_is_named() -> Result<()> {
        let s3 = AppConfig::from_yaml_str(FULL)?.s3.expect("s3 section");

        let err = s3
            .credentials_from(|name| (name == "MY_KEY").then(|| "id".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == "MY_SECRET is not set"));
        Ok(())
    }

    #[test]
    fn connectors_point_at_configured_buckets() -> Result<()> {
        let s3 = AppConfig::from_yaml_str(FULL)?.s3.expect("s3 section");
        let creds = s3.credentials_from(|_| Some("x".to_string()))?;

        let source = s3.source_connector(&creds)?;
        let target = s3.target_connector(&creds)?;
        assert_eq!(
            source.location("2022-12-31/a.csv"),
            "https://s3.eu-central-1.amazonaws.com/deutsche-boerse-xetra-pds/2022-12-31/a.csv"
        );
        assert_eq!(target.bucket(), "xetra-report");
        assert_eq!(target.endpoint_url(), "http://localhost:9000");
        Ok(())
    }
}
