//! Common error types used across the workspace.

/// Errors surfaced by the broadcast hub.
///
/// The hub has no fallible operations while it is running: delivery
/// problems are handled per subscriber and never reported to callers.
/// The only failure a caller can observe is that the hub is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HubError {
    /// The hub loop has stopped and no longer accepts requests.
    #[error("broadcast hub is no longer running")]
    Closed,
}
