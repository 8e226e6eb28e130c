//! # pulsehub-domain
//!
//! Pure domain model for the pulsehub broadcast server.
//!
//! ## Responsibilities
//! - Foundational types: subscriber identifiers, error conventions, timestamps
//! - Define **Messages** (opaque payloads fanned out to every subscriber)
//! - Allocate subscriber identities that never collide with a live one
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! Channels, tasks and the hub loop live in the `app` crate.

pub mod error;
pub mod id;
pub mod message;
pub mod time;
