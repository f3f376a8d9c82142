//! Logging capability handed to the comparator
//!
//! The comparator never logs through process-wide state directly. It is given
//! a `DiffLogger` and reports through it; `TracingLogger` is the default and
//! forwards everything to `tracing`, so the binary's subscriber decides what
//! is shown.

/// Leveled logging sink used for observability only.
pub trait DiffLogger: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Forwards log messages to the `tracing` macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiffLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}
