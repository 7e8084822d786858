//! 8-bit sample DAC on PB0-PB7.
//!
//! The DAC only listens: every host store becomes the current output sample. It uses
//! the PC line as a sample strobe, so it asks for that line to be routed.

use crate::common::SnapshotError;
use crate::port::traits::{DeviceKind, PinCaps, UserportDevice};
use crate::snapshot::ModuleBlob;

/// Display name.
pub const NAME: &str = "Userport DAC";

const MODULE: &str = "USERPORT_DAC";
const MAJOR: u8 = 0;
const MINOR: u8 = 1;

/// The DAC and its last sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserportDac {
    sample: u8,
}

impl Default for UserportDac {
    fn default() -> Self {
        Self::new()
    }
}

impl UserportDac {
    /// Creates a DAC at mid-scale.
    pub const fn new() -> Self {
        Self { sample: 0x80 }
    }

    /// The current output sample.
    pub const fn sample(&self) -> u8 {
        self.sample
    }
}

impl UserportDevice for UserportDac {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Dac
    }

    fn name(&self) -> &str {
        NAME
    }

    fn resource(&self) -> &'static str {
        super::RESOURCE_DAC
    }

    fn caps(&self) -> PinCaps {
        PinCaps {
            store_pbx: true,
            needs_pc: true,
            ..PinCaps::default()
        }
    }

    fn store_pbx(&mut self, value: u8) {
        self.sample = value;
    }

    fn reset(&mut self) {
        self.sample = 0x80;
    }

    fn snapshot(&self) -> Option<ModuleBlob> {
        Some(ModuleBlob::new(MODULE, MAJOR, MINOR, vec![self.sample]))
    }

    fn restore(&mut self, blob: &ModuleBlob) -> Result<(), SnapshotError> {
        let data = blob.expect_layout(MODULE, MAJOR, 1)?;
        self.sample = data[0];
        Ok(())
    }
}
