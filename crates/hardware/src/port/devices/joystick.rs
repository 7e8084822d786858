//! Parallel two-port joystick adapter.
//!
//! The first extra joystick is wired straight to PB0-PB4 (up, down, left, right, fire).
//! The second one only contributes its fire button, on PA2. All lines are active-low.

use crate::input::{InputSampler, JoyPort, buttons};
use crate::port::traits::{AdapterRole, DeviceKind, Pin, PinCaps, PortValue, UserportDevice};

/// Display name.
pub const NAME: &str = "Userport joystick";

/// PB0-PB4.
const DIRECTIONS_AND_FIRE: u8 = 0x1F;

/// Stateless parallel joystick adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserportJoystick;

impl UserportJoystick {
    /// Creates the adapter.
    pub const fn new() -> Self {
        Self
    }
}

impl UserportDevice for UserportJoystick {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Joystick
    }

    fn name(&self) -> &str {
        NAME
    }

    fn resource(&self) -> &'static str {
        super::RESOURCE_JOYSTICK
    }

    fn adapter(&self) -> Option<AdapterRole> {
        Some(AdapterRole::Joystick)
    }

    fn caps(&self) -> PinCaps {
        PinCaps {
            read_pbx: true,
            read_pa2: true,
            ..PinCaps::default()
        }
    }

    fn read_pbx(&mut self, input: &dyn InputSampler) -> PortValue {
        let word = input.sample_word(JoyPort::Userport1);
        let pressed = (word & u16::from(DIRECTIONS_AND_FIRE)) as u8;
        PortValue::new(!pressed & DIRECTIONS_AND_FIRE, DIRECTIONS_AND_FIRE)
    }

    fn read_pin(&mut self, pin: Pin, input: &dyn InputSampler) -> bool {
        match pin {
            Pin::Pa2 => input.sample_word(JoyPort::Userport2) & buttons::A == 0,
            _ => true,
        }
    }
}
