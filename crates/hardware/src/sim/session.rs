//! Emulation session: everything attached to one host.
//!
//! The session owns the parallel cable with its drives, the user-port registry and the
//! controller state. It is the single entry point for:
//! 1. **Resources:** Enabling and disabling user-port devices by key.
//! 2. **Host accesses:** User-port and cable reads and stores at a host cycle.
//! 3. **Drive power:** Turning drive units on and off.
//! 4. **Snapshots:** Saving and restoring the whole attached state.

use crate::bus::{DriverId, ParallelCable};
use crate::common::{ClockRatio, ConfigError, Cycle, SessionError, SnapshotError};
use crate::config::Config;
use crate::input::JoystickState;
use crate::port::devices::{self, resource_for_module};
use crate::port::{DeviceDescriptor, DeviceHandle, DeviceRegistry, Pin};
use crate::snapshot::{ModuleBlob, SessionSnapshot};
use crate::stats::BusStats;
use crate::sync::{ClockDomain, DriveUnit, ScriptedCpu};

/// One emulated host and its peripherals.
#[derive(Debug)]
pub struct Session {
    cable: ParallelCable,
    registry: DeviceRegistry,
    input: JoystickState,
    drives: Vec<(u8, DriverId)>,
    trace_bus: bool,
}

impl Session {
    /// Builds a session from configuration.
    ///
    /// Drives are connected in configuration order, then user-port devices are enabled
    /// in configuration order.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the configuration is invalid or two configured
    /// devices claim the same adapter role.
    pub fn new(config: &Config) -> Result<Self, SessionError> {
        config.validate()?;

        let mut cable = ParallelCable::new();
        let mut drives = Vec::with_capacity(config.drives.len());
        for drive in &config.drives {
            let ratio = ClockRatio::new(drive.clock_hz, config.general.host_hz);
            let cpu = ScriptedCpu::new(drive.script.clone());
            let mut unit = DriveUnit::new(drive.unit, ratio, Box::new(cpu));
            if !drive.enabled {
                unit.set_enabled(false, Cycle::ZERO);
            }
            drives.push((drive.unit, cable.connect(Box::new(unit))));
        }

        let mut session = Self {
            cable,
            registry: DeviceRegistry::new(),
            input: JoystickState::new(),
            drives,
            trace_bus: config.general.trace_bus,
        };
        for key in &config.userport.devices {
            session.set_resource(key, true)?;
        }
        Ok(session)
    }

    /// Enables or disables the user-port device behind `key`.
    ///
    /// Setting a resource to its current state does nothing. Enabling registers a fresh
    /// device (so its protocol state starts from power-on); disabling unregisters it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownResource`] for an unknown key, or the registry's
    /// conflict error if the device's adapter role is taken.
    pub fn set_resource(&mut self, key: &str, enabled: bool) -> Result<(), SessionError> {
        let active = self.registry.find_by_resource(key);
        match (active, enabled) {
            (Some(_), true) | (None, false) => {}
            (None, true) => {
                let device = devices::create(key)
                    .ok_or_else(|| ConfigError::UnknownResource(key.to_string()))?;
                let _ = self.registry.register(device)?;
            }
            (Some(handle), false) => {
                let _ = self.registry.unregister(handle)?;
            }
        }
        tracing::debug!(resource = key, enabled, "resource set");
        Ok(())
    }

    /// Whether the device behind `key` is active.
    pub fn resource_enabled(&self, key: &str) -> bool {
        self.registry.find_by_resource(key).is_some()
    }

    /// Host store to PB0-PB7 at host cycle `now`.
    ///
    /// The byte reaches every listening user-port device and the parallel cable.
    pub fn store_userport(&mut self, value: u8, now: Cycle) {
        if self.trace_bus {
            tracing::trace!(value, cycle = now.val(), "userport store");
        }
        self.registry.store_pbx(value);
        self.cable.cpu_write(value, now);
    }

    /// Host load from PB0-PB7 at host cycle `now`.
    ///
    /// With a drive enabled the devices' level is ANDed with the cable; otherwise only
    /// the devices drive the port.
    pub fn read_userport(&mut self, now: Cycle) -> u8 {
        let devices = self.registry.read_pbx(&self.input);
        let value = if self.cable.has_enabled_domain() {
            self.cable.cpu_read(devices, now)
        } else {
            devices
        };
        if self.trace_bus {
            tracing::trace!(value, cycle = now.val(), "userport read");
        }
        value
    }

    /// Host store to a single control pin.
    pub fn store_pin(&mut self, pin: Pin, level: bool) {
        self.registry.store_pin(pin, level);
    }

    /// Host load from a single control pin.
    pub fn read_pin(&mut self, pin: Pin) -> bool {
        self.registry.read_pin(pin, &self.input)
    }

    /// Host load from the parallel cable alone.
    pub fn read_cable(&mut self, now: Cycle) -> u8 {
        self.cable.read(now)
    }

    /// Restores the host's cable output without synchronizing.
    pub fn cpu_undump(&mut self, value: u8) {
        self.cable.cpu_undump(value);
    }

    fn drive_slot(&self, unit: u8) -> Option<DriverId> {
        self.drives
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|&(_, id)| id)
    }

    /// Powers drive `unit` on or off at host cycle `now`.
    ///
    /// Returns `false` if no such drive is configured.
    pub fn set_drive_enabled(&mut self, unit: u8, enabled: bool, now: Cycle) -> bool {
        self.drive_slot(unit)
            .is_some_and(|id| self.cable.set_enabled(id, enabled, now))
    }

    /// Whether drive `unit` exists and is powered.
    pub fn drive_enabled(&self, unit: u8) -> bool {
        self.drive_slot(unit)
            .and_then(|id| self.cable.domain(id))
            .is_some_and(ClockDomain::is_enabled)
    }

    /// Returns drive `unit`.
    pub fn drive(&self, unit: u8) -> Option<&DriveUnit> {
        self.drive_slot(unit)
            .and_then(|id| self.cable.domain(id))
            .and_then(ClockDomain::as_drive)
    }

    /// Drive-side store for drive `unit`; returns `false` if there is no such drive.
    pub fn drive_write(&mut self, unit: u8, value: u8) -> bool {
        let Some(id) = self.drive_slot(unit) else {
            return false;
        };
        self.cable.drive_write(id, value);
        true
    }

    /// Drive-side load of the cable.
    pub fn drive_read(&self) -> u8 {
        self.cable.drive_read()
    }

    /// Controller state.
    pub const fn input(&self) -> &JoystickState {
        &self.input
    }

    /// Mutable controller state, for the frontend.
    pub const fn input_mut(&mut self) -> &mut JoystickState {
        &mut self.input
    }

    /// The parallel cable.
    pub const fn cable(&self) -> &ParallelCable {
        &self.cable
    }

    /// The user-port registry.
    pub const fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Traffic counters, including user-port collisions.
    pub fn stats(&self) -> BusStats {
        BusStats {
            read_collisions: self.registry.collisions(),
            ..self.cable.stats().clone()
        }
    }

    /// Saves the cable slots, the active device set and every stateful device.
    pub fn snapshot(&self, now: Cycle) -> SessionSnapshot {
        SessionSnapshot {
            clock: now,
            cable: ModuleBlob::new(
                SessionSnapshot::CABLE_MODULE,
                SessionSnapshot::CABLE_MAJOR,
                SessionSnapshot::CABLE_MINOR,
                self.cable.slots(),
            ),
            resources: self
                .registry
                .iter()
                .map(|d| d.device().resource().to_string())
                .collect(),
            devices: self
                .registry
                .iter()
                .filter_map(|d| d.device().snapshot())
                .collect(),
        }
    }

    /// Restores a snapshot taken by [`snapshot`](Self::snapshot).
    ///
    /// The user port ends up with exactly the snapshot's device set, in its order:
    /// active devices are removed, the listed ones are enabled fresh and their blobs
    /// applied. State is assigned directly; no catch-up runs and no edges are replayed.
    ///
    /// The whole snapshot is checked before anything changes, so on error the session
    /// is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownResource`] for an unknown key,
    /// [`SnapshotError::UnknownModule`] for a blob no listed device writes, a layout
    /// error for foreign or truncated blobs, or a registry conflict if the listed
    /// devices claim the same adapter role.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
        let _ = snapshot.cable.expect_layout(
            SessionSnapshot::CABLE_MODULE,
            SessionSnapshot::CABLE_MAJOR,
            0,
        )?;
        let mut staged = Self::stage_devices(snapshot)?;

        self.cable.restore_slots(&snapshot.cable.data);
        let active: Vec<DeviceHandle> =
            self.registry.iter().map(DeviceDescriptor::handle).collect();
        for handle in active {
            let _ = self.registry.unregister(handle)?;
        }
        let restored: Vec<DeviceHandle> = staged.iter().map(DeviceDescriptor::handle).collect();
        for handle in restored {
            let device = staged.unregister(handle)?;
            let _ = self.registry.adopt(device)?;
        }
        tracing::debug!(
            clock = snapshot.clock.val(),
            devices = self.registry.len(),
            "snapshot restored"
        );
        Ok(())
    }

    /// Builds the snapshot's devices in a scratch registry and applies their blobs.
    fn stage_devices(snapshot: &SessionSnapshot) -> Result<DeviceRegistry, SessionError> {
        let mut staged = DeviceRegistry::new();
        for key in &snapshot.resources {
            let device = devices::create(key)
                .ok_or_else(|| ConfigError::UnknownResource(key.clone()))?;
            let _ = staged.register(device)?;
        }
        for blob in &snapshot.devices {
            let device = resource_for_module(&blob.name)
                .and_then(|key| staged.find_by_resource(key))
                .and_then(|handle| staged.get_mut(handle))
                .ok_or_else(|| SnapshotError::UnknownModule(blob.name.clone()))?;
            device.restore(blob)?;
        }
        Ok(staged)
    }
}
