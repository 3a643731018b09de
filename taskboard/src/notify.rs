//! User-facing notification seam.
//!
//! The board core reports operation outcomes through the [`Notifier`]
//! trait; the hosting application decides how to render them (toast,
//! status bar, ...). [`TracingNotifier`] logs them, [`RecordingNotifier`]
//! collects them for assertions.

use parking_lot::Mutex;

/// Sink for transient user-facing notifications.
pub trait Notifier: Send + Sync {
    /// An operation completed.
    fn success(&self, message: &str);

    /// An operation failed and local state was recovered.
    fn error(&self, message: &str);
}

/// Notifier that forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!("notification: {message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!("notification: {message}");
    }
}

/// A recorded notification, for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Success message.
    Success(String),
    /// Error message.
    Error(String),
}

/// Notifier that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    /// Number of recorded error notifications.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Error(_)))
            .count()
    }

    /// Number of recorded success notifications.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|n| matches!(n, Notification::Success(_)))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.entries
            .lock()
            .push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.entries
            .lock()
            .push(Notification::Error(message.to_string()));
    }
}
