//! Clock-domain synchronization.
//!
//! This module keeps independently stepped processors causally ordered around a shared
//! bus. It provides the [`ClockDomain`] trait, the stock [`DriveUnit`] domain, and the
//! [`DomainSync`] catch-up engine the bus entry points call before every host access.

/// Clock-domain trait.
pub mod domain;

/// Disk drive units and their CPUs.
pub mod drive;

/// Catch-up engine.
pub mod synchronizer;

pub use domain::ClockDomain;
pub use drive::{DriveCpu, DriveOp, DriveUnit, ScriptedCpu};
pub use synchronizer::{CatchUp, DomainSync};
