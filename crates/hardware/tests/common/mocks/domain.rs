use mockall::mock;
use retrobus_core::bus::SlotWriter;
use retrobus_core::common::Cycle;
use retrobus_core::sync::ClockDomain;
use std::sync::{Arc, Mutex};

mock! {
    pub Tracked {
        pub fn execute_until(&mut self, target: Cycle);
    }
}

/// A clock domain that jumps straight to each target and reports the call to a mock.
///
/// The mock is shared so a test can keep checking expectations after the domain has
/// been boxed and handed to a cable.
pub struct TrackedDomain {
    mock: Arc<Mutex<MockTracked>>,
    name: &'static str,
    clock: Cycle,
    enabled: bool,
    output: Option<u8>,
}

impl TrackedDomain {
    pub fn new(mock: MockTracked, name: &'static str) -> (Self, Arc<Mutex<MockTracked>>) {
        let mock = Arc::new(Mutex::new(mock));
        let domain = Self {
            mock: Arc::clone(&mock),
            name,
            clock: Cycle::ZERO,
            enabled: true,
            output: None,
        };
        (domain, mock)
    }

    /// Writes `value` to its slot every time it executes.
    pub fn driving(mut self, value: u8) -> Self {
        self.output = Some(value);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl ClockDomain for TrackedDomain {
    fn name(&self) -> &str {
        self.name
    }

    fn clock(&self) -> Cycle {
        self.clock
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool, now: Cycle) {
        if enabled && !self.enabled {
            self.clock = self.clock.max(now);
        }
        self.enabled = enabled;
    }

    fn execute_until(&mut self, target: Cycle, port: &mut SlotWriter<'_>) {
        self.mock.lock().unwrap().execute_until(target);
        if let Some(value) = self.output {
            port.write(value);
        }
        self.clock = self.clock.max(target);
    }
}
