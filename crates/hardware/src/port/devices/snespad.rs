//! SNES controller on a user-port shift-register adapter.
//!
//! The host bit-bangs the pad's serial protocol over PB3 (clock) and PB5 (latch) and
//! reads the current button on PB6:
//! 1. **Latch:** A falling edge on the latch line restarts the report at index 0.
//! 2. **Clock:** Each falling edge on the clock line advances to the next button.
//!    After the last button the pad reports end-of-stream and stops advancing.
//! 3. **Data:** The selected button's state appears on PB6, active-low.

use crate::common::SnapshotError;
use crate::common::constants::{PB_ALL, PB_CLOCK, PB_DATA_SHIFT, PB_LATCH};
use crate::input::{InputSampler, JoyPort, buttons};
use crate::port::traits::{AdapterRole, DeviceKind, PinCaps, PortValue, UserportDevice};
use crate::snapshot::ModuleBlob;

/// Counter value after the last button: end of stream.
pub const EOS: u8 = 12;

/// Input-word bit reported at each counter position, in the pad's shift order.
pub const REPORT_ORDER: [u16; EOS as usize] = [
    buttons::B,
    buttons::Y,
    buttons::SELECT,
    buttons::START,
    buttons::UP,
    buttons::DOWN,
    buttons::LEFT,
    buttons::RIGHT,
    buttons::A,
    buttons::X,
    buttons::L,
    buttons::R,
];

/// Display name.
pub const NAME: &str = "Userport SNES pad";

const MODULE: &str = "USERPORT_SNESPAD";
const MAJOR: u8 = 0;
const MINOR: u8 = 1;

/// Shift-register state of the pad.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnesPad {
    counter: u8,
    clock_line: bool,
    latch_line: bool,
    port: JoyPort,
}

impl Default for SnesPad {
    fn default() -> Self {
        Self::new()
    }
}

impl SnesPad {
    /// Creates a pad reading [`JoyPort::Userport1`].
    pub const fn new() -> Self {
        Self::on_port(JoyPort::Userport1)
    }

    /// Creates a pad reading `port`.
    pub const fn on_port(port: JoyPort) -> Self {
        Self {
            counter: 0,
            clock_line: false,
            latch_line: false,
            port,
        }
    }

    /// Index of the button currently being reported (`EOS` after the last one).
    pub const fn counter(&self) -> u8 {
        self.counter
    }

    /// Last clock level the host drove.
    pub const fn clock_line(&self) -> bool {
        self.clock_line
    }

    /// Last latch level the host drove.
    pub const fn latch_line(&self) -> bool {
        self.latch_line
    }

    /// Applies a host store to PB0-PB7.
    ///
    /// The latch edge is evaluated before the clock edge, both against the levels from
    /// the previous store.
    pub const fn clock_in(&mut self, value: u8) {
        let clock = value & PB_CLOCK != 0;
        let latch = value & PB_LATCH != 0;

        if self.latch_line && !latch {
            self.counter = 0;
        }
        if self.clock_line && !clock && self.counter != EOS {
            self.counter += 1;
        }

        self.clock_line = clock;
        self.latch_line = latch;
    }

    /// The data bit for the current position: 1 if the button is pressed, and always
    /// 1 at end of stream.
    pub fn data_bit(&self, word: u16) -> u8 {
        REPORT_ORDER
            .get(usize::from(self.counter))
            .map_or(1, |&mask| u8::from(word & mask != 0))
    }

    /// The byte the adapter puts on PB0-PB7 for `word`.
    pub fn output(&self, word: u16) -> u8 {
        !(self.data_bit(word) << PB_DATA_SHIFT)
    }
}

impl UserportDevice for SnesPad {
    fn kind(&self) -> DeviceKind {
        DeviceKind::SnesPad
    }

    fn name(&self) -> &str {
        NAME
    }

    fn resource(&self) -> &'static str {
        super::RESOURCE_SNESPAD
    }

    fn adapter(&self) -> Option<AdapterRole> {
        Some(AdapterRole::Joystick)
    }

    fn caps(&self) -> PinCaps {
        PinCaps {
            read_pbx: true,
            store_pbx: true,
            ..PinCaps::default()
        }
    }

    fn read_pbx(&mut self, input: &dyn InputSampler) -> PortValue {
        PortValue::new(self.output(input.sample_word(self.port)), PB_ALL)
    }

    fn store_pbx(&mut self, value: u8) {
        self.clock_in(value);
    }

    fn reset(&mut self) {
        self.counter = 0;
        self.clock_line = false;
        self.latch_line = false;
    }

    fn snapshot(&self) -> Option<ModuleBlob> {
        Some(ModuleBlob::new(
            MODULE,
            MAJOR,
            MINOR,
            vec![self.counter, u8::from(self.clock_line), u8::from(self.latch_line)],
        ))
    }

    fn restore(&mut self, blob: &ModuleBlob) -> Result<(), SnapshotError> {
        let data = blob.expect_layout(MODULE, MAJOR, 3)?;
        let (counter, clock, latch) = (data[0], data[1], data[2]);
        if counter > EOS {
            tracing::warn!(counter, "snes pad counter out of range, clamping");
        }
        self.counter = counter.min(EOS);
        self.clock_line = clock != 0;
        self.latch_line = latch != 0;
        Ok(())
    }

    fn as_snes_pad(&self) -> Option<&Self> {
        Some(self)
    }
}
