//! Shared bus lines.
//!
//! This module contains the open-drain line primitive and the host/drive parallel
//! cable built on top of it.

/// Host-to-drive parallel cable.
pub mod cable;

/// Wired-AND line with per-driver slots.
pub mod wired;

pub use cable::ParallelCable;
pub use wired::{DriverId, SlotWriter, WiredBus};
