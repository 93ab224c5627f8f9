//! Logging setup.
//!
//! The `logging` section of the job configuration deserializes into [`LoggingConfig`], which is
//! applied once at startup with [`LoggingConfig::init`]:
//!
//! ```yaml
//! logging:
//!   level: info
//!   format: compact
//!   writer: stderr
//!   directives:
//!     - aws_config=warn
//!     - aws_smithy_runtime=warn
//! ```
//!
//! `RUST_LOG` is not consulted; the file is the single source of filter directives.

use crate::error::{Error, Result};
use serde::Deserialize;
use tracing::Subscriber;
use tracing_subscriber::filter::{Directive, EnvFilter};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Event formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
    Json,
}

/// Where events are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogWriter {
    Stdout,
    #[default]
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter, e.g. `info` or `xetra=debug,warn`.
    pub level: String,
    pub format: LogFormat,
    pub writer: LogWriter,
    /// Colored output.
    pub ansi: bool,
    /// Include the event's module path.
    pub with_target: bool,
    /// Extra filter directives added on top of `level`.
    pub directives: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            writer: LogWriter::Stderr,
            ansi: false,
            with_target: true,
            directives: Vec::new(),
        }
    }
}

impl LoggingConfig {
    /// Build the filter from `level` plus `directives`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if a directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        let mut filter = EnvFilter::try_new(&self.level)
            .map_err(|e| Error::Config(format!("invalid log level '{}': {e}", self.level)))?;
        for raw in &self.directives {
            let directive: Directive = raw
                .parse()
                .map_err(|e| Error::Config(format!("invalid log directive '{raw}': {e}")))?;
            filter = filter.add_directive(directive);
        }
        Ok(filter)
    }

    /// The formatting layer, writing to `make_writer`.
    pub fn layer_with_writer<S, W>(&self, make_writer: W) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = fmt::layer()
            .with_writer(make_writer)
            .with_ansi(self.ansi)
            .with_target(self.with_target);
        match self.format {
            LogFormat::Full => layer.boxed(),
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Json => layer.json().boxed(),
        }
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the filter is invalid or a global subscriber is already set.
    pub fn init(&self) -> Result<()> {
        let layer = match self.writer {
            LogWriter::Stdout => self.layer_with_writer(std::io::stdout),
            LogWriter::Stderr => self.layer_with_writer(std::io::stderr),
        };
        tracing_subscriber::registry()
            .with(self.env_filter()?)
            .with(layer)
            .try_init()
            .map_err(|e| Error::Config(format!("cannot install logger: {e}")))
    }
}
