use relman_notify::Severity;

use crate::Result;

/// Fire-and-forget delivery of status messages to an external channel.
///
/// Workflow control flow never depends on delivery succeeding; the
/// presentation layer decides what a failed notification means.
pub trait Notifier: Send + Sync {
    fn is_configured(&self) -> bool;

    /// # Errors
    ///
    /// Returns an error if the channel rejects the message.
    fn notify(&self, message: &str, severity: Severity) -> Result<()>;
}
