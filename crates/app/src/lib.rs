//! # pulsehub-app
//!
//! Application layer — the broadcast hub and the **port definitions** (traits)
//! around it.
//!
//! ## Responsibilities
//! - Own the authoritative subscriber set inside a single control loop
//!   (`hub::Hub`) and expose it through a cloneable `hub::HubHandle`
//! - Fan out each published message to every registered subscriber without
//!   letting a stalled subscriber hold up the others
//! - Define the **publisher port** (`MessagePublisher`) that producers call
//! - Provide the reference producer, a fixed-interval clock (`ticker`)
//!
//! ## Dependency rule
//! Depends on `pulsehub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod hub;
pub mod ports;
pub mod subscriber;
pub mod ticker;
