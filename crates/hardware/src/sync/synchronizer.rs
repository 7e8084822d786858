//! Catch-up of secondary clock domains.
//!
//! Before the host reads a shared bus, or before a host write is considered to have
//! happened, every enabled secondary domain must have executed up to the host's current
//! cycle. Otherwise the host would observe (or overwrite) bus state that is causally
//! stale. [`DomainSync::catch_up_all`] performs that step synchronously: it returns only
//! once every enabled domain has reached the target.

use crate::bus::wired::{DriverId, WiredBus};
use crate::common::Cycle;
use crate::sync::domain::ClockDomain;

/// Outcome of one [`DomainSync::catch_up_all`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchUp {
    /// The host cycle the domains were brought to.
    pub target: Cycle,
    /// Domains that actually had to execute (already-current ones are not counted).
    pub advanced: usize,
}

struct SyncEntry {
    domain: Box<dyn ClockDomain>,
    driver: DriverId,
}

/// The set of secondary domains sharing one bus, each bound to its driver slot.
#[derive(Default)]
pub struct DomainSync {
    entries: Vec<SyncEntry>,
}

impl DomainSync {
    /// Creates an empty synchronizer.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a domain that drives the bus through `driver`.
    pub fn add(&mut self, domain: Box<dyn ClockDomain>, driver: DriverId) {
        self.entries.push(SyncEntry { domain, driver });
    }

    /// Returns `true` if at least one domain is enabled.
    pub fn any_enabled(&self) -> bool {
        self.entries.iter().any(|e| e.domain.is_enabled())
    }

    /// Number of attached domains, enabled or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no domain is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Brings every enabled domain to at least `target`.
    ///
    /// With no enabled domain this does nothing. A domain already at or past `target`
    /// is not called, so repeating a call with the same target has no further effect.
    ///
    /// # Arguments
    ///
    /// * `target` - Host cycle every enabled domain must reach.
    /// * `bus` - The shared bus; each domain only gets a writer for its own slot.
    ///
    /// # Returns
    ///
    /// A [`CatchUp`] summary.
    pub fn catch_up_all(&mut self, target: Cycle, bus: &mut WiredBus) -> CatchUp {
        let mut advanced = 0;
        for entry in self.entries.iter_mut().filter(|e| e.domain.is_enabled()) {
            let from = entry.domain.clock();
            if from >= target {
                continue;
            }
            entry.domain.execute_until(target, &mut bus.writer(entry.driver));
            advanced += 1;
            tracing::trace!(
                domain = entry.domain.name(),
                from = from.val(),
                to = entry.domain.clock().val(),
                "caught up"
            );
        }
        CatchUp { target, advanced }
    }

    /// Powers the domain bound to `driver` on or off; returns `false` if there is none.
    pub fn set_enabled(&mut self, driver: DriverId, enabled: bool, now: Cycle) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.driver == driver) else {
            return false;
        };
        entry.domain.set_enabled(enabled, now);
        true
    }

    /// Returns the domain bound to `driver`.
    pub fn domain(&self, driver: DriverId) -> Option<&dyn ClockDomain> {
        self.entries
            .iter()
            .find(|e| e.driver == driver)
            .map(|e| e.domain.as_ref())
    }

    /// Iterates over `(driver, domain)` pairs in attach order.
    pub fn iter(&self) -> impl Iterator<Item = (DriverId, &dyn ClockDomain)> + '_ {
        self.entries.iter().map(|e| (e.driver, e.domain.as_ref()))
    }
}

impl std::fmt::Debug for DomainSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .iter()
                    .map(|e| (e.domain.name().to_string(), e.driver, e.domain.clock())),
            )
            .finish()
    }
}
