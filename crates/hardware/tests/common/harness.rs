use retrobus_core::Session;
use retrobus_core::common::Cycle;
use retrobus_core::common::constants::{PB_CLOCK, PB_LATCH};
use retrobus_core::config::{Config, DriveConfig};

/// A session plus a host clock that tests advance explicitly.
pub struct TestContext {
    pub session: Session,
    pub now: Cycle,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Bare host: no drives, no user-port devices.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("retrobus_core=trace")
            .try_init();

        let session = Session::new(config).unwrap();
        Self {
            session,
            now: Cycle::ZERO,
        }
    }

    /// Host with the given user-port resources enabled.
    pub fn with_devices(keys: &[&str]) -> Self {
        let mut config = Config::default();
        config.userport.devices = keys.iter().map(|k| (*k).to_string()).collect();
        Self::with_config(&config)
    }

    /// Host with idle drives on the given units, all at the host clock rate.
    pub fn with_drives(units: &[u8]) -> Self {
        let mut config = Config::default();
        config.general.host_hz = 1_000_000;
        config.drives = units.iter().map(|&u| DriveConfig::new(u)).collect();
        Self::with_config(&config)
    }

    pub fn advance(&mut self, cycles: u64) {
        self.now += cycles;
    }

    pub fn store(&mut self, value: u8) {
        self.session.store_userport(value, self.now);
    }

    pub fn read(&mut self) -> u8 {
        self.session.read_userport(self.now)
    }

    /// Latch pulse (high then low) with the clock held low.
    pub fn latch(&mut self) {
        self.store(PB_LATCH);
        self.store(0);
    }

    /// One clock pulse (high then low).
    pub fn clock(&mut self) {
        self.store(PB_CLOCK);
        self.store(0);
    }
}
