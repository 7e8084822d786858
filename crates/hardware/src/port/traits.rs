//! Device trait for the user port.
//!
//! This module defines the contract every user-port peripheral implements. It provides:
//! 1. **Identification:** Kind tag, display name, resource key and optional adapter role.
//! 2. **Capabilities:** A [`PinCaps`] set declaring which pin handlers are present.
//! 3. **Pin handlers:** Byte-wide `PB0-PB7` read/store and single-pin `PA2`, `PA3`,
//!    `SP1`, `SP2` read/store, all defaulting to "absent".
//! 4. **State:** Reset on activation plus snapshot/restore.
//! 5. **Downcasting:** Optional cast to [`SnesPad`] for inspection.
//!
//! The registry only calls a handler if the matching capability is declared, so a
//! device that leaves a handler at its default never sees that traffic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::SnapshotError;
use crate::input::InputSampler;
use crate::port::devices::SnesPad;
use crate::snapshot::ModuleBlob;

/// Which kind of peripheral a device is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    /// SNES controller on a shift-register adapter.
    SnesPad,
    /// Parallel joystick adapter.
    Joystick,
    /// 8-bit sample DAC.
    Dac,
}

/// A role at most one active device may hold at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdapterRole {
    /// Redirects joystick input through the user port.
    Joystick,
}

impl fmt::Display for AdapterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joystick => f.write_str("joystick adapter"),
        }
    }
}

/// Individually addressed user-port control pins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pin {
    /// CIA2 port A bit 2.
    Pa2,
    /// CIA2 port A bit 3.
    Pa3,
    /// CIA1 serial port.
    Sp1,
    /// CIA2 serial port.
    Sp2,
}

/// Declared handler set of a device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinCaps {
    /// Drives PB0-PB7 on reads.
    pub read_pbx: bool,
    /// Listens to stores on PB0-PB7.
    pub store_pbx: bool,
    /// Drives PA2 on reads.
    pub read_pa2: bool,
    /// Listens to PA2.
    pub store_pa2: bool,
    /// Drives PA3 on reads.
    pub read_pa3: bool,
    /// Listens to PA3.
    pub store_pa3: bool,
    /// Drives SP1 on reads.
    pub read_sp1: bool,
    /// Listens to SP1.
    pub store_sp1: bool,
    /// Drives SP2 on reads.
    pub read_sp2: bool,
    /// Listens to SP2.
    pub store_sp2: bool,
    /// Requires the PC handshake line to be routed to the port.
    pub needs_pc: bool,
}

impl PinCaps {
    /// Whether a read handler for `pin` is present.
    pub const fn reads(&self, pin: Pin) -> bool {
        match pin {
            Pin::Pa2 => self.read_pa2,
            Pin::Pa3 => self.read_pa3,
            Pin::Sp1 => self.read_sp1,
            Pin::Sp2 => self.read_sp2,
        }
    }

    /// Whether a store handler for `pin` is present.
    pub const fn stores(&self, pin: Pin) -> bool {
        match pin {
            Pin::Pa2 => self.store_pa2,
            Pin::Pa3 => self.store_pa3,
            Pin::Sp1 => self.store_sp1,
            Pin::Sp2 => self.store_sp2,
        }
    }
}

/// A device's answer to a byte-wide read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortValue {
    /// Levels driven by the device.
    pub value: u8,
    /// Bits the device actually drives; the rest float high.
    pub mask: u8,
}

impl PortValue {
    /// Nothing driven.
    pub const IDLE: Self = Self {
        value: 0xFF,
        mask: 0x00,
    };

    /// Creates a value driving the bits in `mask`.
    pub const fn new(value: u8, mask: u8) -> Self {
        Self { value, mask }
    }

    /// The level this value puts on the wires: undriven bits read as 1.
    pub const fn level(self) -> u8 {
        self.value | !self.mask
    }
}

/// A peripheral plugged into the user port.
pub trait UserportDevice: Send {
    /// Kind tag.
    fn kind(&self) -> DeviceKind;

    /// Display name, as shown in conflict messages (e.g. `"Userport SNES pad"`).
    fn name(&self) -> &str;

    /// Resource key that enables this device.
    fn resource(&self) -> &'static str;

    /// Adapter role this device claims while active, if any.
    fn adapter(&self) -> Option<AdapterRole> {
        None
    }

    /// Handlers this device implements.
    fn caps(&self) -> PinCaps;

    /// Computes the device's PB0-PB7 output, sampling `input` once.
    fn read_pbx(&mut self, _input: &dyn InputSampler) -> PortValue {
        PortValue::IDLE
    }

    /// Receives a host store to PB0-PB7.
    fn store_pbx(&mut self, _value: u8) {}

    /// Computes the level the device drives on `pin`.
    fn read_pin(&mut self, _pin: Pin, _input: &dyn InputSampler) -> bool {
        true
    }

    /// Receives a host store to `pin`.
    fn store_pin(&mut self, _pin: Pin, _level: bool) {}

    /// Returns the device to its power-on state.
    fn reset(&mut self) {}

    /// Saves the device state; `None` for stateless devices.
    fn snapshot(&self) -> Option<ModuleBlob> {
        None
    }

    /// Restores state saved by [`snapshot`](Self::snapshot).
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the blob is foreign or truncated.
    fn restore(&mut self, _blob: &ModuleBlob) -> Result<(), SnapshotError> {
        Ok(())
    }

    /// Returns this device as a [`SnesPad`] if it is one; otherwise `None`.
    fn as_snes_pad(&self) -> Option<&SnesPad> {
        None
    }
}
