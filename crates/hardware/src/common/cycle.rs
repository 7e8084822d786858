//! Logical clock types.
//!
//! This module defines the strong types used to express time across clock domains. It provides:
//! 1. **Cycle:** A monotonic cycle count in the host (primary) timebase.
//! 2. **Clock ratio:** Conversion between a secondary domain's own cycles and host cycles.
//!
//! Every domain reports its position as a host-timebase `Cycle`, so catch-up targets
//! compare directly regardless of the domain's own clock rate.

use serde::{Deserialize, Serialize};

/// A point in logical time, counted in host CPU cycles.
///
/// Cycles only move forward; nothing in the crate ever decrements one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cycle(pub u64);

impl Cycle {
    /// The start of time.
    pub const ZERO: Self = Self(0);

    /// Creates a cycle count from a raw value.
    #[inline(always)]
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    /// Returns the raw cycle count.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns the number of cycles from `earlier` to `self`, or zero if `earlier` is later.
    #[inline]
    pub const fn since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl core::ops::Add<u64> for Cycle {
    type Output = Self;

    fn add(self, rhs: u64) -> Self {
        Self(self.0 + rhs)
    }
}

impl core::ops::AddAssign<u64> for Cycle {
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl core::fmt::Display for Cycle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frequency relationship between a secondary domain and the host.
///
/// A 1541 runs at 1 MHz while a PAL C64 runs at 985,248 Hz, so the same wall time
/// is a different number of cycles on each side. The ratio converts a domain's own
/// elapsed cycles into host cycles with integer arithmetic only, keeping the
/// conversion bit-exact and reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRatio {
    /// Clock rate of the secondary domain in Hz.
    pub domain_hz: u64,
    /// Clock rate of the host in Hz.
    pub host_hz: u64,
}

impl ClockRatio {
    /// A 1:1 ratio, used when both sides share a crystal.
    pub const UNITY: Self = Self {
        domain_hz: 1,
        host_hz: 1,
    };

    /// Creates a ratio from the two clock rates.
    ///
    /// A zero rate on either side falls back to 1 Hz so conversions stay defined.
    pub const fn new(domain_hz: u64, host_hz: u64) -> Self {
        Self {
            domain_hz: if domain_hz == 0 { 1 } else { domain_hz },
            host_hz: if host_hz == 0 { 1 } else { host_hz },
        }
    }

    /// Converts a count of domain cycles into host cycles (rounded down).
    ///
    /// # Arguments
    ///
    /// * `domain_cycles` - Cycles elapsed on the secondary domain's own clock.
    ///
    /// # Returns
    ///
    /// The equivalent position in the host timebase.
    pub fn to_host(&self, domain_cycles: u64) -> Cycle {
        let host = u128::from(domain_cycles) * u128::from(self.host_hz) / u128::from(self.domain_hz);
        Cycle(u64::try_from(host).unwrap_or(u64::MAX))
    }

    /// Returns the smallest domain cycle count whose host equivalent reaches `host`.
    pub fn to_domain_ceil(&self, host: Cycle) -> u64 {
        let num = u128::from(host.0) * u128::from(self.domain_hz);
        let den = u128::from(self.host_hz);
        u64::try_from(num.div_ceil(den)).unwrap_or(u64::MAX)
    }
}

impl Default for ClockRatio {
    fn default() -> Self {
        Self::UNITY
    }
}
