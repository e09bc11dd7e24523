//! Logger collaborator.

/// Sink for the machine's lifecycle messages.
///
/// The machine never requires a logger; without one, messages are dropped.
pub trait Logger: Send + Sync {
    /// Informational message about transition progress.
    fn log(&self, message: &str);

    /// Error swallowed by the machine, tagged with the reporting component.
    fn log_error(&self, component: &str, message: &str);
}

/// Logger that forwards to `tracing` events.
///
/// Messages are emitted under the `statestack` target, informational ones at
/// `info` and errors at `error`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "statestack", "{}", message);
    }

    fn log_error(&self, component: &str, message: &str) {
        tracing::error!(target: "statestack", component, "{}", message);
    }
}
