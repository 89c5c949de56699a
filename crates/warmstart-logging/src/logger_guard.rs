#[derive(Default)]
pub(crate) struct LoggerGuard {
    guards: Vec<Box<dyn Send>>,
}

impl LoggerGuard {
    pub(crate) fn add_guard(&mut self, guard: impl Send + 'static) {
        self.guards.push(Box::new(guard));
    }
}
