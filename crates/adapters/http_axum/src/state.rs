//! Shared application state for axum handlers.

use pulsehub_app::hub::HubHandle;

/// Application state shared across all axum handlers.
///
/// The hub handle is itself a cheap clone around a channel sender, so no
/// extra `Arc` is needed.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the running broadcast hub.
    pub hub: HubHandle,
}

impl AppState {
    /// Create a new application state around a hub handle.
    #[must_use]
    pub fn new(hub: HubHandle) -> Self {
        Self { hub }
    }
}
