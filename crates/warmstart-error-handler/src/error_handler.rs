use std::fmt::Display;
use std::sync::OnceLock;

use color_eyre::config::Theme;
use tracing::error;

static HANDLER: OnceLock<ErrorHandler> = OnceLock::new();

#[derive(thiserror::Error, Debug)]
#[error("Unable to install error handler: {0}")]
pub struct HookInstallError(String);

/// Process-wide panic and error report hook.
///
/// Reports go to stderr unless disabled. A service with no terminal attached
/// should turn on logging instead so failures land in the system log.
#[derive(Clone)]
pub struct ErrorHandler {
    theme: Theme,
    pub(crate) write_to_stderr: bool,
    pub(crate) log: bool,
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self {
            theme: Theme::dark(),
            write_to_stderr: true,
            log: false,
        }
    }
}

impl ErrorHandler {
    pub fn with_theme(self, theme: Theme) -> Self {
        Self { theme, ..self }
    }

    pub fn with_write_to_stderr(self, write_to_stderr: bool) -> Self {
        Self {
            write_to_stderr,
            ..self
        }
    }

    pub fn with_log(self, log: bool) -> Self {
        Self { log, ..self }
    }

    pub fn install(self) -> Result<(), HookInstallError> {
        let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
            .add_default_filters()
            .theme(self.theme.clone())
            .into_hooks();

        HANDLER
            .set(self.clone())
            .map_err(|_| HookInstallError("Handler was already set".to_owned()))?;

        eyre_hook
            .install()
            .map_err(|e| HookInstallError(e.to_string()))?;

        std::panic::set_hook(Box::new(move |pi| {
            self.write_output(panic_hook.panic_report(pi).to_string());
        }));
        Ok(())
    }

    /// The installed handler, or the stderr-only default before
    /// [`ErrorHandler::install`] has run.
    pub(crate) fn current() -> Self {
        HANDLER.get().cloned().unwrap_or_default()
    }

    fn write_output(&self, output: impl Display) {
        if self.log {
            error!("{output}");
        }
        if self.write_to_stderr {
            eprintln!("{output}");
        }
    }
}
