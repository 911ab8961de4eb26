//! User-visible error notifications.
//!
//! The cart store never returns errors from its public operations; failures
//! surface as fire-and-forget messages through a [`NotificationSink`]. The
//! sink is a constructor parameter, so tests can capture messages and the
//! CLI can print them to the terminal.

/// Fire-and-forget sink for user-visible error messages.
pub trait NotificationSink {
    /// Surface an error message to the user.
    fn notify_error(&self, message: &str);
}

/// Notification sink that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify_error(&self, message: &str) {
        tracing::warn!(target: "copper_kettle_cart::notify", "{message}");
    }
}
