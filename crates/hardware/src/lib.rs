//! Shared-bus peripheral core for 8-bit home computer emulation.
//!
//! This crate models the glue between a host CPU and the peripherals that share its
//! buses with the following:
//! 1. **Bus:** An open-drain wired-AND line and the host/drive parallel cable built on it.
//! 2. **Sync:** Catch-up of secondary clock domains (disk drive CPUs) before host accesses.
//! 3. **Port:** The user-port device registry with adapter exclusivity and pin dispatch.
//! 4. **Devices:** A SNES pad shift-register adapter, a joystick adapter and a DAC.
//! 5. **Session:** Configuration, snapshots and statistics tying the pieces together.

/// Wired-AND line and parallel cable.
pub mod bus;
/// Common types (cycles, clock ratios, constants, errors).
pub mod common;
/// Session configuration (defaults, drive list, user-port devices).
pub mod config;
/// Controller input state and sampling.
pub mod input;
/// User-port registry, device trait and stock devices.
pub mod port;
/// Session assembly.
pub mod sim;
/// Snapshot containers.
pub mod snapshot;
/// Bus activity statistics.
pub mod stats;
/// Clock-domain catch-up and drive units.
pub mod sync;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Top-level session; construct with `Session::new`.
pub use crate::sim::Session;
