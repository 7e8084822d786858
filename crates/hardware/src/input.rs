//! Host-side controller input.
//!
//! Devices never read the keyboard or a gamepad themselves. They ask an
//! [`InputSampler`] for a bit-packed word per logical port each time they compute an
//! output, so the frontend stays the single owner of physical input state.

use serde::{Deserialize, Serialize};

/// Logical joystick ports a device can sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoyPort {
    /// Native control port 1.
    Port1,
    /// Native control port 2.
    Port2,
    /// First user-port adapter port.
    Userport1,
    /// Second user-port adapter port.
    Userport2,
}

impl JoyPort {
    /// All ports in index order.
    pub const ALL: [Self; 4] = [Self::Port1, Self::Port2, Self::Userport1, Self::Userport2];

    /// Position in [`ALL`](Self::ALL).
    pub const fn index(self) -> usize {
        match self {
            Self::Port1 => 0,
            Self::Port2 => 1,
            Self::Userport1 => 2,
            Self::Userport2 => 3,
        }
    }
}

/// Bit positions inside an input word. A set bit means "pressed".
pub mod buttons {
    /// D-pad up.
    pub const UP: u16 = 1 << 0;
    /// D-pad down.
    pub const DOWN: u16 = 1 << 1;
    /// D-pad left.
    pub const LEFT: u16 = 1 << 2;
    /// D-pad right.
    pub const RIGHT: u16 = 1 << 3;
    /// Primary fire (SNES A).
    pub const A: u16 = 1 << 4;
    /// SNES B.
    pub const B: u16 = 1 << 5;
    /// SNES X.
    pub const X: u16 = 1 << 6;
    /// SNES Y.
    pub const Y: u16 = 1 << 7;
    /// Left shoulder.
    pub const L: u16 = 1 << 8;
    /// Right shoulder.
    pub const R: u16 = 1 << 9;
    /// Select.
    pub const SELECT: u16 = 1 << 10;
    /// Start.
    pub const START: u16 = 1 << 11;
}

/// Source of controller state.
pub trait InputSampler {
    /// Returns the pressed-button word for `port` at this instant.
    fn sample_word(&self, port: JoyPort) -> u16;
}

/// Button state held in memory, set by the frontend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoystickState {
    words: [u16; 4],
}

impl JoystickState {
    /// Creates a state with nothing pressed.
    pub const fn new() -> Self {
        Self { words: [0; 4] }
    }

    /// Replaces the whole word for `port`.
    pub const fn set(&mut self, port: JoyPort, word: u16) {
        self.words[port.index()] = word;
    }

    /// Marks `buttons` as pressed on `port`.
    pub const fn press(&mut self, port: JoyPort, buttons: u16) {
        self.words[port.index()] |= buttons;
    }

    /// Marks `buttons` as released on `port`.
    pub const fn release(&mut self, port: JoyPort, buttons: u16) {
        self.words[port.index()] &= !buttons;
    }

    /// Releases everything on every port.
    pub const fn clear(&mut self) {
        self.words = [0; 4];
    }
}

impl InputSampler for JoystickState {
    fn sample_word(&self, port: JoyPort) -> u16 {
        self.words[port.index()]
    }
}
