//! User-port peripherals.
//!
//! This module contains the stock devices and the resource catalog that maps
//! configuration keys onto them.

/// 8-bit sample DAC.
pub mod dac;

/// Parallel joystick adapter.
pub mod joystick;

/// SNES pad shift-register adapter.
pub mod snespad;

pub use dac::UserportDac;
pub use joystick::UserportJoystick;
pub use snespad::SnesPad;

use crate::port::traits::UserportDevice;

/// Resource key enabling the SNES pad adapter.
pub const RESOURCE_SNESPAD: &str = "UserportSNESPad";

/// Resource key enabling the parallel joystick adapter.
pub const RESOURCE_JOYSTICK: &str = "UserportJoystick";

/// Resource key enabling the DAC.
pub const RESOURCE_DAC: &str = "UserportDAC";

/// Every resource key a device can be enabled by.
pub const RESOURCES: [&str; 3] = [RESOURCE_SNESPAD, RESOURCE_JOYSTICK, RESOURCE_DAC];

/// Builds a fresh device for `resource`, or `None` if the key is unknown.
pub fn create(resource: &str) -> Option<Box<dyn UserportDevice>> {
    match resource {
        RESOURCE_SNESPAD => Some(Box::new(SnesPad::new())),
        RESOURCE_JOYSTICK => Some(Box::new(UserportJoystick::new())),
        RESOURCE_DAC => Some(Box::new(UserportDac::new())),
        _ => None,
    }
}

/// Maps a snapshot module name back to the resource whose device writes it.
pub fn resource_for_module(module: &str) -> Option<&'static str> {
    match module {
        "USERPORT_SNESPAD" => Some(RESOURCE_SNESPAD),
        "USERPORT_DAC" => Some(RESOURCE_DAC),
        _ => None,
    }
}
