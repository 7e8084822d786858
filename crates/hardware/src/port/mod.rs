//! User port.
//!
//! This module models the host's user port and what is plugged into it. It provides:
//! 1. **Device contract:** The [`UserportDevice`] trait and its capability set.
//! 2. **Registry:** Ordered activation, adapter exclusivity and pin dispatch.
//! 3. **Devices:** The SNES pad adapter, a parallel joystick adapter and a DAC.

/// Stock user-port peripherals.
pub mod devices;

/// Device registry and dispatch.
pub mod registry;

/// Device trait and capability types.
pub mod traits;

pub use registry::{DeviceDescriptor, DeviceHandle, DeviceRegistry};
pub use traits::{AdapterRole, DeviceKind, Pin, PinCaps, PortValue, UserportDevice};
