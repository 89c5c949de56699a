#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Signal {
    SIGTERM,
    SIGQUIT,
    SIGINT,
    SIGHUP,
    Other(String),
}

impl Signal {
    /// Whether receiving this signal should stop the service.
    pub fn is_termination(&self) -> bool {
        matches!(self, Signal::SIGTERM | Signal::SIGQUIT | Signal::SIGINT)
    }
}

impl From<&str> for Signal {
    fn from(source: &str) -> Self {
        match source.to_uppercase().as_ref() {
            "SIGTERM" => Signal::SIGTERM,
            "SIGQUIT" => Signal::SIGQUIT,
            "SIGINT" => Signal::SIGINT,
            "SIGHUP" => Signal::SIGHUP,
            _ => Signal::Other(source.to_string()),
        }
    }
}
