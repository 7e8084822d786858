//! Error types for registration, configuration and snapshot handling.
//!
//! This module defines every failure the crate reports. It provides:
//! 1. **Registry errors:** Adapter conflicts and unknown device handles.
//! 2. **Snapshot errors:** Truncated or foreign state blobs.
//! 3. **Configuration errors:** Unreadable or malformed configuration and unknown resources.
//! 4. **Session errors:** An umbrella type so session-level APIs can use `?` throughout.
//!
//! Bus accesses, catch-up and dispatch never fail; they have no error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::port::{AdapterRole, DeviceHandle};

/// Failures reported by the device registry.
///
/// Both variants are returned synchronously to the caller that attempted the change,
/// and in both cases the registry is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A device tried to claim an adapter role another active device already holds.
    #[error("{device} is a {role}, but {role} {holder} is already active")]
    Conflict {
        /// Display name of the device that was refused.
        device: String,
        /// The contested role.
        role: AdapterRole,
        /// Display name of the device currently holding the role.
        holder: String,
    },

    /// The handle does not name an active device (never issued, or already removed).
    #[error("no active device for handle {0}")]
    InvalidHandle(DeviceHandle),
}

/// Failures while decoding snapshot data.
///
/// Out-of-range values inside a well-formed blob are clamped rather than reported;
/// only data that cannot be interpreted at all ends up here.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The blob is shorter than the module's layout requires.
    #[error("snapshot module {module} truncated: expected {expected} bytes, found {found}")]
    Truncated {
        /// Module name the blob was meant for.
        module: &'static str,
        /// Bytes required by the layout.
        expected: usize,
        /// Bytes actually present.
        found: usize,
    },

    /// A module in the snapshot does not belong to any active component.
    #[error("snapshot module {0} has no matching component")]
    UnknownModule(String),

    /// The module was written by an incompatible layout version.
    #[error("snapshot module {module} version {major}.{minor} is not supported")]
    VersionMismatch {
        /// Module name.
        module: String,
        /// Major version found in the snapshot.
        major: u8,
        /// Minor version found in the snapshot.
        minor: u8,
    },

    /// The serialized container could not be encoded or decoded.
    #[error("snapshot container: {0}")]
    Container(#[from] serde_json::Error),
}

/// Failures while loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A resource key does not name any known device.
    #[error("unknown resource {0:?}")]
    UnknownResource(String),

    /// A drive unit number is outside the addressable range.
    #[error("drive unit {0} is outside 8..=11")]
    InvalidDriveUnit(u8),

    /// Two drives were configured with the same unit number.
    #[error("drive unit {0} configured twice")]
    DuplicateDriveUnit(u8),
}

/// Any failure surfaced by the session API.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Device registration or removal failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Snapshot data was rejected.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
