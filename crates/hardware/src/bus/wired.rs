//! Wired-AND (open-drain) byte-wide bus line.
//!
//! Every participant owns one driver slot holding the last byte it wrote. A driver can
//! only pull bits low: the level seen on the wires is the bitwise AND of every enabled
//! slot, and a slot nobody has written floats high (`0xFF`).
//!
//! The AND is recomputed on each read and never cached, so the observed value is always
//! a pure function of the slots.

use std::fmt;

use crate::common::constants::IDLE_BYTE;

/// Identifies one driver slot on a [`WiredBus`].
///
/// Only [`WiredBus::attach`] hands these out; a participant keeps its id and is the only
/// party that writes through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverId(usize);

impl DriverId {
    /// Returns the slot index on its bus.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    value: u8,
    enabled: bool,
}

/// Open-drain shared bus with one slot per driver.
#[derive(Debug, Clone, Default)]
pub struct WiredBus {
    slots: Vec<Slot>,
}

impl WiredBus {
    /// Creates a bus with no drivers; it reads `0xFF`.
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Adds a driver slot, idle and enabled.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in logs and snapshots (e.g. `"host"`, `"drive8"`).
    ///
    /// # Returns
    ///
    /// The id the new driver writes through.
    pub fn attach(&mut self, name: impl Into<String>) -> DriverId {
        self.slots.push(Slot {
            name: name.into(),
            value: IDLE_BYTE,
            enabled: true,
        });
        DriverId(self.slots.len() - 1)
    }

    /// Stores `value` as the driver's current output.
    pub fn write(&mut self, id: DriverId, value: u8) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.value = value;
        }
    }

    /// Returns the level on the bus: the AND of every enabled slot.
    pub fn read(&self) -> u8 {
        self.slots
            .iter()
            .filter(|s| s.enabled)
            .fold(IDLE_BYTE, |acc, s| acc & s.value)
    }

    /// Force-sets a slot during state restoration.
    ///
    /// Identical to [`write`](Self::write) at the line level; kept separate so callers
    /// that wrap the line with synchronization can restore without triggering it.
    pub fn undump(&mut self, id: DriverId, value: u8) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            tracing::trace!(driver = %slot.name, value, "undump slot");
            slot.value = value;
        }
    }

    /// Returns the last byte a driver wrote, regardless of whether it is enabled.
    pub fn slot(&self, id: DriverId) -> u8 {
        self.slots.get(id.0).map_or(IDLE_BYTE, |s| s.value)
    }

    /// Returns the driver's label.
    pub fn name(&self, id: DriverId) -> Option<&str> {
        self.slots.get(id.0).map(|s| s.name.as_str())
    }

    /// Includes or excludes a driver from the AND; a disabled slot keeps its byte.
    pub fn set_enabled(&mut self, id: DriverId, enabled: bool) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.enabled = enabled;
        }
    }

    /// Returns whether the driver currently takes part in the AND.
    pub fn is_enabled(&self, id: DriverId) -> bool {
        self.slots.get(id.0).is_some_and(|s| s.enabled)
    }

    /// Returns every slot byte in attach order.
    pub fn slots(&self) -> Vec<u8> {
        self.slots.iter().map(|s| s.value).collect()
    }

    /// Iterates over every driver id in attach order.
    pub fn ids(&self) -> impl Iterator<Item = DriverId> + use<> {
        (0..self.slots.len()).map(DriverId)
    }

    /// Number of attached drivers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no driver is attached.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Borrows a writer that can only touch `id`'s slot.
    ///
    /// Secondary domains receive one of these while they execute so they cannot
    /// disturb anyone else's output.
    pub fn writer(&mut self, id: DriverId) -> SlotWriter<'_> {
        SlotWriter { bus: self, id }
    }
}

/// Write access to exactly one slot of a [`WiredBus`], plus read access to the line.
#[derive(Debug)]
pub struct SlotWriter<'a> {
    bus: &'a mut WiredBus,
    id: DriverId,
}

impl SlotWriter<'_> {
    /// The slot this writer owns.
    pub const fn id(&self) -> DriverId {
        self.id
    }

    /// Drives the owned slot.
    pub fn write(&mut self, value: u8) {
        self.bus.write(self.id, value);
    }

    /// Reads the bus level (AND of all enabled slots).
    pub fn read(&self) -> u8 {
        self.bus.read()
    }

    /// Returns the owned slot's last byte.
    pub fn current(&self) -> u8 {
        self.bus.slot(self.id)
    }
}
