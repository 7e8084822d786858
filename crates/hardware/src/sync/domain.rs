//! Clock-domain trait for secondary processors.
//!
//! A clock domain is an independently stepped execution stream with its own monotonic
//! clock (a disk drive's CPU, for instance). The host never interleaves with a domain
//! concurrently; it calls [`ClockDomain::execute_until`] and waits for it to return.

use crate::bus::wired::SlotWriter;
use crate::common::Cycle;
use crate::sync::drive::DriveUnit;

/// A secondary execution stream attached to a shared bus.
///
/// Implementors report time in the host timebase so the synchronizer can compare a
/// domain's clock against a host cycle directly.
pub trait ClockDomain: Send {
    /// Short label for logs (e.g. `"drive8"`).
    fn name(&self) -> &str;

    /// Current position of this domain, in host cycles.
    fn clock(&self) -> Cycle;

    /// Whether the domain is powered and taking part in bus traffic.
    fn is_enabled(&self) -> bool;

    /// Powers the domain on or off at host cycle `now`.
    ///
    /// A domain that comes back on must not replay the time it spent off, so
    /// implementors fast-forward their clock to `now` without executing anything.
    fn set_enabled(&mut self, enabled: bool, now: Cycle);

    /// Executes until [`clock`](Self::clock) is at or past `target`.
    ///
    /// `port` is the domain's own slot on the shared bus; it is the only slot the
    /// domain may drive. Returns immediately if the domain is already at `target`, and
    /// stops short only if the domain's own counter cannot advance any further.
    fn execute_until(&mut self, target: Cycle, port: &mut SlotWriter<'_>);

    /// Returns this domain as a [`DriveUnit`] if it is one; otherwise `None`.
    fn as_drive(&self) -> Option<&DriveUnit> {
        None
    }
}
