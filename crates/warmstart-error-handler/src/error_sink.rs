use std::fmt::{self, Debug};

use color_eyre::Report;
use tracing::error;
use warmstart_core::BoxedError;

use crate::ErrorHandler;

/// Error type for `main`.
///
/// Formatting the sink, which the runtime does after `main` returns, writes
/// the report to the formatter when the installed [`ErrorHandler`] targets
/// stderr and to the log when it logs. Log writers are usually gone by then,
/// so call [`ErrorSink::log_now`] while they are still alive.
pub struct ErrorSink {
    report: Report,
    logged: bool,
}

impl ErrorSink {
    pub fn new(source: impl Into<Report>) -> Self {
        Self {
            report: source.into(),
            logged: false,
        }
    }

    pub fn from_error(source: BoxedError) -> Self {
        Self::new(color_eyre::eyre::eyre!(source))
    }

    /// Logs the report right away if the installed handler logs reports. It is
    /// not logged a second time when the sink is formatted.
    pub fn log_now(mut self) -> Self {
        if ErrorHandler::current().log {
            error!("{:?}", self.report);
            self.logged = true;
        }
        self
    }
}

impl<R> From<R> for ErrorSink
where
    R: Into<Report>,
{
    fn from(value: R) -> Self {
        Self::new(value)
    }
}

impl Debug for ErrorSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handler = ErrorHandler::current();
        if handler.log && !self.logged {
            error!("{:?}", self.report);
        }
        if handler.write_to_stderr {
            write!(f, "{:?}", self.report)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "./error_sink_test.rs"]
mod error_sink_test;
