//! User-port device registry.
//!
//! The registry owns every active user-port device and routes host pin traffic to them.
//! It provides:
//! 1. **Registration:** Devices are appended in order with a fresh insertion tag; an
//!    adapter role can be claimed by at most one device at a time.
//! 2. **Dispatch:** Reads and stores go only to devices declaring the matching
//!    capability. Read results are merged with wired-AND semantics in insertion order.
//! 3. **Collision detection:** Devices that drive opposite levels on a bit both claim
//!    are flagged for the current pass. The merged value is still the AND.

use std::fmt;

use crate::common::RegistryError;
use crate::input::InputSampler;
use crate::port::traits::{AdapterRole, Pin, PortValue, UserportDevice};

/// Names one registered device. Handles are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceHandle(u64);

impl DeviceHandle {
    /// The insertion tag; later registrations have larger tags.
    pub const fn tag(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered device plus the registry's bookkeeping for it.
pub struct DeviceDescriptor {
    device: Box<dyn UserportDevice>,
    handle: DeviceHandle,
    retval: u8,
    mask: u8,
    collision: bool,
}

impl DeviceDescriptor {
    /// The device.
    pub fn device(&self) -> &dyn UserportDevice {
        self.device.as_ref()
    }

    /// Handle issued at registration.
    pub const fn handle(&self) -> DeviceHandle {
        self.handle
    }

    /// Value the device returned on the last byte-wide read.
    pub const fn retval(&self) -> u8 {
        self.retval
    }

    /// Validity mask of the last byte-wide read.
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    /// Whether the device took part in a collision during the last read pass.
    pub const fn collision(&self) -> bool {
        self.collision
    }
}

impl fmt::Debug for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDescriptor")
            .field("name", &self.device.name())
            .field("handle", &self.handle)
            .field("retval", &self.retval)
            .field("mask", &self.mask)
            .field("collision", &self.collision)
            .finish()
    }
}

/// Ordered set of active user-port devices.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<DeviceDescriptor>,
    next_tag: u64,
    collisions: u64,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            devices: Vec::new(),
            next_tag: 0,
            collisions: 0,
        }
    }

    /// Activates a device.
    ///
    /// The device is reset, appended after every existing device, and claims its
    /// adapter role if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Conflict`] if the device's adapter role is already
    /// held. The registry is unchanged and the device is dropped.
    pub fn register(
        &mut self,
        mut device: Box<dyn UserportDevice>,
    ) -> Result<DeviceHandle, RegistryError> {
        self.check_claim(device.as_ref())?;
        device.reset();
        Ok(self.insert(device))
    }

    /// Activates a device as it is, without resetting it.
    ///
    /// Used when restoring state that was already applied to the device.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Conflict`] under the same rule as
    /// [`register`](Self::register).
    pub fn adopt(
        &mut self,
        device: Box<dyn UserportDevice>,
    ) -> Result<DeviceHandle, RegistryError> {
        self.check_claim(device.as_ref())?;
        Ok(self.insert(device))
    }

    fn check_claim(&self, device: &dyn UserportDevice) -> Result<(), RegistryError> {
        let claim = device
            .adapter()
            .and_then(|role| self.holder_of(role).map(|holder| (role, holder.to_string())));
        let Some((role, holder)) = claim else {
            return Ok(());
        };
        let err = RegistryError::Conflict {
            device: device.name().to_string(),
            role,
            holder,
        };
        tracing::warn!("{err}");
        Err(err)
    }

    fn insert(&mut self, device: Box<dyn UserportDevice>) -> DeviceHandle {
        let handle = DeviceHandle(self.next_tag);
        self.next_tag += 1;
        tracing::debug!(device = device.name(), %handle, "device registered");
        self.devices.push(DeviceDescriptor {
            device,
            handle,
            retval: 0xFF,
            mask: 0xFF,
            collision: false,
        });
        handle
    }

    /// Deactivates a device, releasing any adapter role it held.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidHandle`] if `handle` is not active.
    pub fn unregister(
        &mut self,
        handle: DeviceHandle,
    ) -> Result<Box<dyn UserportDevice>, RegistryError> {
        let index = self
            .devices
            .iter()
            .position(|d| d.handle == handle)
            .ok_or(RegistryError::InvalidHandle(handle))?;
        let removed = self.devices.remove(index);
        tracing::debug!(device = removed.device.name(), %handle, "device unregistered");
        Ok(removed.device)
    }

    fn holder_of(&self, role: AdapterRole) -> Option<&str> {
        self.devices
            .iter()
            .find(|d| d.device.adapter() == Some(role))
            .map(|d| d.device.name())
    }

    /// Name of the device holding the joystick adapter role, if any.
    pub fn active_adapter(&self) -> Option<&str> {
        self.holder_of(AdapterRole::Joystick)
    }

    /// Looks up a device by handle.
    pub fn get(&self, handle: DeviceHandle) -> Option<&DeviceDescriptor> {
        self.devices.iter().find(|d| d.handle == handle)
    }

    /// Looks up a device by handle, mutably.
    pub fn get_mut(&mut self, handle: DeviceHandle) -> Option<&mut dyn UserportDevice> {
        let desc = self.devices.iter_mut().find(|d| d.handle == handle)?;
        Some(desc.device.as_mut())
    }

    /// Finds the active device enabled by `resource`.
    pub fn find_by_resource(&self, resource: &str) -> Option<DeviceHandle> {
        self.devices
            .iter()
            .find(|d| d.device.resource() == resource)
            .map(|d| d.handle)
    }

    /// Iterates over active devices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.devices.iter()
    }

    /// Number of active devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no device is active.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Whether any active device needs the PC handshake line.
    pub fn needs_pc_line(&self) -> bool {
        self.devices.iter().any(|d| d.device.caps().needs_pc)
    }

    /// Total read passes that detected a collision.
    pub const fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Reads PB0-PB7 from every device that drives it.
    ///
    /// # Arguments
    ///
    /// * `input` - Controller state, sampled by each device as it computes its output.
    ///
    /// # Returns
    ///
    /// The AND of every device's level, `0xFF` if no device drives the port.
    pub fn read_pbx(&mut self, input: &dyn InputSampler) -> u8 {
        let mut level = 0xFF;
        let mut driven: Vec<(usize, PortValue)> = Vec::new();
        for (index, desc) in self.devices.iter_mut().enumerate() {
            desc.collision = false;
            if !desc.device.caps().read_pbx {
                continue;
            }
            let out = desc.device.read_pbx(input);
            desc.retval = out.value;
            desc.mask = out.mask;
            level &= out.level();
            driven.push((index, out));
        }

        if self.flag_collisions(&driven, |a, b| (a.value ^ b.value) & a.mask & b.mask != 0) {
            tracing::debug!(level, "user port read collision");
        }
        level
    }

    /// Sends a PB0-PB7 store to every device that listens to it, in insertion order.
    pub fn store_pbx(&mut self, value: u8) {
        for desc in self
            .devices
            .iter_mut()
            .filter(|d| d.device.caps().store_pbx)
        {
            desc.device.store_pbx(value);
        }
    }

    /// Reads a single control pin; `true` (high) if nobody drives it.
    pub fn read_pin(&mut self, pin: Pin, input: &dyn InputSampler) -> bool {
        let mut level = true;
        let mut driven: Vec<(usize, bool)> = Vec::new();
        for (index, desc) in self.devices.iter_mut().enumerate() {
            desc.collision = false;
            if !desc.device.caps().reads(pin) {
                continue;
            }
            let out = desc.device.read_pin(pin, input);
            level &= out;
            driven.push((index, out));
        }

        if self.flag_collisions(&driven, |a, b| a != b) {
            tracing::debug!(?pin, level, "user port pin collision");
        }
        level
    }

    /// Flags both devices of every driven pair that `conflicts` and counts the pass
    /// once. Returns whether anything collided.
    fn flag_collisions<T: Copy>(
        &mut self,
        driven: &[(usize, T)],
        conflicts: impl Fn(T, T) -> bool,
    ) -> bool {
        let mut collided = false;
        for (i, &(a, va)) in driven.iter().enumerate() {
            for &(b, vb) in &driven[i + 1..] {
                if conflicts(va, vb) {
                    self.devices[a].collision = true;
                    self.devices[b].collision = true;
                    collided = true;
                }
            }
        }
        if collided {
            self.collisions += 1;
        }
        collided
    }

    /// Sends a store on `pin` to every device that listens to it.
    pub fn store_pin(&mut self, pin: Pin, level: bool) {
        for desc in self
            .devices
            .iter_mut()
            .filter(|d| d.device.caps().stores(pin))
        {
            desc.device.store_pin(pin, level);
        }
    }
}
