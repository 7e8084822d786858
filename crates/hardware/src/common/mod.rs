//! Common types shared throughout the crate.
//!
//! This module provides the fundamental building blocks every component uses. It includes:
//! 1. **Clock types:** The host-timebase `Cycle` and per-domain `ClockRatio`.
//! 2. **Constants:** Idle bus values, userport pin masks and stock clock rates.
//! 3. **Error handling:** Registry, snapshot, configuration and session errors.

/// Bus-level constants (idle values, pin masks, clock rates).
pub mod constants;

/// Logical clock types.
pub mod cycle;

/// Error types.
pub mod error;

pub use cycle::{ClockRatio, Cycle};
pub use error::{ConfigError, RegistryError, SessionError, SnapshotError};
