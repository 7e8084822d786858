//! Disk drive units as secondary clock domains.
//!
//! A drive contains its own CPU running at roughly 1 MHz, independent of the host.
//! This module wraps that CPU as a [`ClockDomain`]:
//! 1. **Opaque CPU:** Instruction interpretation sits behind the [`DriveCpu`] trait; the
//!    unit only knows how many drive cycles each step consumed.
//! 2. **Timebase conversion:** Drive cycles are converted to host cycles through a
//!    [`ClockRatio`], so catch-up targets compare directly.
//! 3. **Scripted CPU:** [`ScriptedCpu`] replays a fixed program of bus writes and idle
//!    stretches, which is enough to drive the parallel cable deterministically.

use serde::{Deserialize, Serialize};

use crate::bus::wired::SlotWriter;
use crate::common::{ClockRatio, Cycle};
use crate::sync::domain::ClockDomain;

/// The instruction-level CPU inside a drive.
///
/// Implementations execute exactly one instruction per [`step`](Self::step) and may
/// drive the unit's bus slot while doing so.
pub trait DriveCpu: Send {
    /// Executes one instruction and returns the drive cycles it took.
    ///
    /// A return of 0 is treated as 1 so execution always makes progress.
    fn step(&mut self, port: &mut SlotWriter<'_>) -> u32;
}

/// One operation of a [`ScriptedCpu`] program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveOp {
    /// Put a byte on the cable (costs [`ScriptedCpu::WRITE_CYCLES`]).
    Write(u8),
    /// Spin for the given number of drive cycles.
    Idle(u32),
}

/// A drive CPU that loops over a fixed list of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedCpu {
    program: Vec<DriveOp>,
    pc: usize,
}

impl ScriptedCpu {
    /// Cycles a scripted write takes (an absolute-addressed store on a 6502).
    pub const WRITE_CYCLES: u32 = 4;

    /// Creates a CPU that runs `program` forever. An empty program idles.
    pub const fn new(program: Vec<DriveOp>) -> Self {
        Self { program, pc: 0 }
    }

    /// Index of the next operation.
    pub const fn pc(&self) -> usize {
        self.pc
    }
}

impl DriveCpu for ScriptedCpu {
    fn step(&mut self, port: &mut SlotWriter<'_>) -> u32 {
        let Some(op) = self.program.get(self.pc).copied() else {
            return 1;
        };
        self.pc = (self.pc + 1) % self.program.len();
        match op {
            DriveOp::Write(value) => {
                port.write(value);
                Self::WRITE_CYCLES
            }
            DriveOp::Idle(cycles) => cycles,
        }
    }
}

/// A disk drive unit: unit number, power state and CPU.
pub struct DriveUnit {
    unit: u8,
    name: String,
    enabled: bool,
    ratio: ClockRatio,
    /// Cycles executed on the drive's own clock.
    own_cycles: u64,
    cpu: Box<dyn DriveCpu>,
}

impl DriveUnit {
    /// Creates a powered-on drive at cycle zero.
    ///
    /// # Arguments
    ///
    /// * `unit` - IEC unit number (8-11).
    /// * `ratio` - Drive clock relative to the host clock.
    /// * `cpu` - The drive's CPU.
    pub fn new(unit: u8, ratio: ClockRatio, cpu: Box<dyn DriveCpu>) -> Self {
        Self {
            unit,
            name: format!("drive{unit}"),
            enabled: true,
            ratio,
            own_cycles: 0,
            cpu,
        }
    }

    /// IEC unit number.
    pub const fn unit(&self) -> u8 {
        self.unit
    }

    /// Cycles executed on the drive's own clock.
    pub const fn own_cycles(&self) -> u64 {
        self.own_cycles
    }

    /// Drive clock relative to the host.
    pub const fn ratio(&self) -> ClockRatio {
        self.ratio
    }
}

impl std::fmt::Debug for DriveUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveUnit")
            .field("unit", &self.unit)
            .field("enabled", &self.enabled)
            .field("ratio", &self.ratio)
            .field("own_cycles", &self.own_cycles)
            .finish_non_exhaustive()
    }
}

impl ClockDomain for DriveUnit {
    fn name(&self) -> &str {
        &self.name
    }

    fn clock(&self) -> Cycle {
        self.ratio.to_host(self.own_cycles)
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool, now: Cycle) {
        if enabled && !self.enabled {
            self.own_cycles = self.own_cycles.max(self.ratio.to_domain_ceil(now));
        }
        self.enabled = enabled;
    }

    fn execute_until(&mut self, target: Cycle, port: &mut SlotWriter<'_>) {
        while self.clock() < target {
            let spent = self.cpu.step(port).max(1);
            self.own_cycles = self.own_cycles.saturating_add(u64::from(spent));
            if self.own_cycles == u64::MAX {
                tracing::warn!(drive = %self.name, "drive clock saturated");
                break;
            }
        }
    }

    fn as_drive(&self) -> Option<&Self> {
        Some(self)
    }
}
