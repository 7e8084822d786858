//! Session assembly.
//!
//! Builds the cable, drives and user-port devices from configuration and exposes the
//! host-facing entry points.

/// Host session and its entry points.
pub mod session;

pub use session::Session;
