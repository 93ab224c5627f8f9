//! Capture formatted log output in tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::logging::LoggingConfig;

/// An in-memory log sink.
///
/// Installing it routes events at `INFO` and above, emitted on the current thread, into a
/// buffer formatted like the default [`LoggingConfig`] output (without colors). Clones share
/// the buffer.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture this thread's events until the returned guard is dropped.
    #[must_use = "events are only captured while the guard is alive"]
    pub fn install(&self) -> DefaultGuard {
        let config = LoggingConfig::default();
        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::INFO)
            .with(config.layer_with_writer(self.clone()));
        tracing::subscriber::set_default(subscriber)
    }

    /// Everything captured so far.
    ///
    /// # Panics
    ///
    /// Panics if the buffer mutex is poisoned.
    #[must_use]
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().expect("log buffer mutex poisoned");
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

impl Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .map_err(|_| io::Error::other("log buffer mutex poisoned"))?
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
