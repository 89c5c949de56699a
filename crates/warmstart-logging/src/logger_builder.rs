use std::io::stderr;
use std::ops::Deref;
use std::sync::{Mutex, OnceLock, PoisonError};

use time::UtcOffset;
use time::format_description::well_known::Rfc3339;
use tracing::metadata::LevelFilter;
use tracing::{Level, Subscriber, debug};
use tracing_appender::non_blocking::NonBlockingBuilder;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use warmstart_core::Label;

use crate::logger_guard::LoggerGuard;

// Lines queued for the stderr writer before new ones are dropped.
const BUFFERED_LINES_LIMIT: usize = 256;

static LOGGER_GUARD: Mutex<Option<LoggerGuard>> = Mutex::new(None);

static LOCAL_TIME: OnceLock<Result<OffsetTime<Rfc3339>, time::error::IndeterminateOffset>> =
    OnceLock::new();

/// Flushes the buffered log writers when dropped. Hold it for the lifetime of
/// `main`.
#[must_use]
pub struct GlobalLoggerGuard;

impl Drop for GlobalLoggerGuard {
    fn drop(&mut self) {
        debug!("Flushing log writers");
        LOGGER_GUARD
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

// The local offset can only be read reliably while the process is still
// single-threaded.
#[ctor::ctor]
fn init_time() {
    LOCAL_TIME.set(OffsetTime::local_rfc_3339()).ok();
}

pub fn init() -> GlobalLoggerGuard {
    GlobalLoggerGuard
}

#[derive(thiserror::Error, Debug)]
pub enum LoggerCreationError {
    #[cfg(feature = "linux-journald")]
    #[error("Error creating journald logging layer: {0}")]
    JournaldFailure(std::io::Error),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LogLevel(pub Level);

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.0)
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(Level::INFO)
    }
}

impl Deref for LogLevel {
    type Target = Level;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(feature = "config")]
impl<'de> serde::Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let val = String::deserialize(deserializer)?;
        let level = val.parse::<Level>().map_err(serde::de::Error::custom)?;
        Ok(LogLevel(level))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(confique::Config))]
pub struct UserConfig {
    /// Minimum level of log messages to emit. `RUST_LOG` directives are
    /// applied on top of this.
    #[cfg_attr(feature = "config", config(default = "info"))]
    pub log_level: LogLevel,
}

/// Builds the process-wide subscriber: pretty output on stderr with local
/// RFC 3339 timestamps, plus journald when the `linux-journald` feature is on.
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    label: Label,
    user_config: UserConfig,
}

impl LoggerBuilder {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            user_config: UserConfig::default(),
        }
    }

    pub fn with_user_config(mut self, user_config: UserConfig) -> Self {
        self.user_config = user_config;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.user_config.log_level.to_level_filter().into())
            .from_env_lossy()
    }

    fn timer() -> OffsetTime<Rfc3339> {
        match LOCAL_TIME.get() {
            Some(Ok(offset)) => offset.clone(),
            Some(Err(e)) => {
                eprintln!("Error getting local time, using UTC: {e}");
                OffsetTime::new(UtcOffset::UTC, Rfc3339)
            }
            None => OffsetTime::new(UtcOffset::UTC, Rfc3339),
        }
    }

    /// Builds the subscriber. Call `.init()` on the result to install it
    /// globally; the writers stay alive until the [`GlobalLoggerGuard`] drops.
    pub fn build(
        self,
    ) -> Result<impl SubscriberInitExt + Subscriber + for<'a> LookupSpan<'a>, LoggerCreationError>
    {
        let (non_blocking_stderr, stderr_guard) = NonBlockingBuilder::default()
            .buffered_lines_limit(BUFFERED_LINES_LIMIT)
            .finish(stderr());
        let mut guard = LoggerGuard::default();
        guard.add_guard(stderr_guard);

        let collector = tracing_subscriber::registry()
            .with(self.filter())
            .with(
                Layer::new()
                    .pretty()
                    .with_timer(Self::timer())
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_writer(non_blocking_stderr),
            )
            .with(tracing_error::ErrorLayer::default());

        #[cfg(all(target_os = "linux", feature = "linux-journald"))]
        let collector = collector.with(
            tracing_journald::layer()
                .map_err(LoggerCreationError::JournaldFailure)?
                .with_syslog_identifier(self.label.application.clone()),
        );
        #[cfg(not(all(target_os = "linux", feature = "linux-journald")))]
        debug!("System log disabled for {}", self.label);

        *LOGGER_GUARD.lock().unwrap_or_else(PoisonError::into_inner) = Some(guard);
        Ok(collector)
    }
}

#[cfg(test)]
#[path = "./logger_builder_test.rs"]
mod logger_builder_test;
