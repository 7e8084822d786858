//! Host-to-drive parallel cable.
//!
//! The cable is an 8-bit open-drain line between the host's user port and one or more
//! disk drives. It combines:
//! 1. **Wired line:** A [`WiredBus`] with one slot for the host and one per drive.
//! 2. **Synchronization:** A [`DomainSync`] that runs every enabled drive up to the
//!    host cycle before the host touches the line.
//! 3. **Presence gating:** With no drive enabled the cable is unplugged as far as the
//!    host is concerned: reads return `0x00` and writes are dropped.

use crate::bus::wired::{DriverId, WiredBus};
use crate::common::Cycle;
use crate::common::constants::IDLE_READ;
use crate::stats::BusStats;
use crate::sync::{ClockDomain, DomainSync};

/// The parallel cable with its attached drives.
#[derive(Debug)]
pub struct ParallelCable {
    line: WiredBus,
    host: DriverId,
    sync: DomainSync,
    stats: BusStats,
}

impl Default for ParallelCable {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelCable {
    /// Creates a cable with only the host slot attached.
    pub fn new() -> Self {
        let mut line = WiredBus::new();
        let host = line.attach("host");
        Self {
            line,
            host,
            sync: DomainSync::new(),
            stats: BusStats::default(),
        }
    }

    /// Plugs a drive (or any other clock domain) into the cable.
    ///
    /// # Returns
    ///
    /// The slot the domain drives.
    pub fn connect(&mut self, domain: Box<dyn ClockDomain>) -> DriverId {
        let id = self.line.attach(domain.name().to_string());
        self.line.set_enabled(id, domain.is_enabled());
        tracing::debug!(domain = domain.name(), slot = id.index(), "domain connected");
        self.sync.add(domain, id);
        id
    }

    /// The host's slot.
    pub const fn host(&self) -> DriverId {
        self.host
    }

    /// Returns `true` if at least one drive is enabled.
    pub fn has_enabled_domain(&self) -> bool {
        self.sync.any_enabled()
    }

    fn catch_up(&mut self, now: Cycle) {
        self.stats.catch_ups += 1;
        let outcome = self.sync.catch_up_all(now, &mut self.line);
        self.stats.domains_advanced += outcome.advanced as u64;
    }

    /// Host store to the cable at host cycle `now`.
    ///
    /// Drives are first brought to `now` so they cannot observe the new byte early.
    /// Without an enabled drive the store is dropped and the host slot keeps its value.
    pub fn cpu_write(&mut self, value: u8, now: Cycle) {
        self.stats.host_writes += 1;
        if !self.has_enabled_domain() {
            self.stats.idle_accesses += 1;
            return;
        }
        self.catch_up(now);
        self.line.write(self.host, value);
    }

    /// Host load from the cable at host cycle `now`.
    ///
    /// # Arguments
    ///
    /// * `data` - Value the host side would see on its own (other devices on the port);
    ///   it is ANDed into the result.
    /// * `now` - Current host cycle.
    ///
    /// # Returns
    ///
    /// `data & line`, or `0x00` if no drive is enabled.
    pub fn cpu_read(&mut self, data: u8, now: Cycle) -> u8 {
        self.stats.host_reads += 1;
        if !self.has_enabled_domain() {
            self.stats.idle_accesses += 1;
            return IDLE_READ;
        }
        self.catch_up(now);
        data & self.line.read()
    }

    /// Host load with nothing else on the port.
    pub fn read(&mut self, now: Cycle) -> u8 {
        self.cpu_read(0xFF, now)
    }

    /// Restores the host slot without synchronizing or gating.
    pub fn cpu_undump(&mut self, value: u8) {
        self.line.undump(self.host, value);
    }

    /// Restores any slot without synchronizing.
    pub fn undump(&mut self, id: DriverId, value: u8) {
        self.line.undump(id, value);
    }

    /// Drive-side store, for drives whose CPU is stepped outside the cable.
    pub fn drive_write(&mut self, id: DriverId, value: u8) {
        if id != self.host {
            self.line.write(id, value);
        }
    }

    /// Drive-side load: the line level, with no catch-up.
    ///
    /// A drive reading the cable is by construction at or behind the host, so there is
    /// nothing to synchronize.
    pub fn drive_read(&self) -> u8 {
        self.line.read()
    }

    /// Powers a connected domain on or off, taking its slot in or out of the AND.
    ///
    /// Returns `false` if `id` is not a connected domain.
    pub fn set_enabled(&mut self, id: DriverId, enabled: bool, now: Cycle) -> bool {
        if !self.sync.set_enabled(id, enabled, now) {
            return false;
        }
        self.line.set_enabled(id, enabled);
        tracing::debug!(slot = id.index(), enabled, "domain power changed");
        true
    }

    /// Returns the domain plugged into `id`.
    pub fn domain(&self, id: DriverId) -> Option<&dyn ClockDomain> {
        self.sync.domain(id)
    }

    /// Iterates over connected domains in connect order.
    pub fn domains(&self) -> impl Iterator<Item = (DriverId, &dyn ClockDomain)> + '_ {
        self.sync.iter()
    }

    /// The last byte written through `id`.
    pub fn slot(&self, id: DriverId) -> u8 {
        self.line.slot(id)
    }

    /// Every slot byte, host first, for snapshots.
    pub fn slots(&self) -> Vec<u8> {
        self.line.slots()
    }

    /// Restores slot bytes saved by [`slots`](Self::slots).
    ///
    /// Extra bytes are ignored; missing ones leave their slots untouched.
    pub fn restore_slots(&mut self, bytes: &[u8]) {
        for (id, &value) in self.line.ids().zip(bytes) {
            self.line.undump(id, value);
        }
    }

    /// Traffic counters.
    pub const fn stats(&self) -> &BusStats {
        &self.stats
    }

    /// Mutable traffic counters.
    pub const fn stats_mut(&mut self) -> &mut BusStats {
        &mut self.stats
    }
}
