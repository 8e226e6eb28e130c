//! # pulsehub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **event stream**: every request to `/` registers a subscriber
//!   with the hub and relays its messages as `text/event-stream` frames
//! - Deregister the subscriber when the client goes away (the response stream
//!   is dropped, which drops the subscription)
//! - Serve small JSON/health endpoints for operators
//! - Map hub errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `pulsehub-app` (for the hub handle) and `pulsehub-domain`
//! (for message and error types). Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
