//! Snapshot containers.
//!
//! Each stateful component saves itself as a named, versioned [`ModuleBlob`] of raw
//! bytes. A [`SessionSnapshot`] bundles the cable's slots and every device blob and is
//! serialized with `serde_json`, together with the resource keys of the active devices.
//! Restoring assigns state directly; no edges or bus traffic are replayed.

use serde::{Deserialize, Serialize};

use crate::common::{Cycle, SnapshotError};

/// One component's saved state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBlob {
    /// Module name, unique per component kind (e.g. `"USERPORT_SNESPAD"`).
    pub name: String,
    /// Layout major version; a mismatch rejects the blob.
    pub major: u8,
    /// Layout minor version; informational.
    pub minor: u8,
    /// Raw state bytes.
    pub data: Vec<u8>,
}

impl ModuleBlob {
    /// Creates a blob.
    pub fn new(name: &str, major: u8, minor: u8, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            major,
            minor,
            data,
        }
    }

    /// Checks that this blob is a `name` blob of major version `major` with at least
    /// `len` bytes, and returns those bytes.
    ///
    /// # Errors
    ///
    /// [`SnapshotError::UnknownModule`] on a name mismatch,
    /// [`SnapshotError::VersionMismatch`] on a different major version, and
    /// [`SnapshotError::Truncated`] if the data is too short.
    pub fn expect_layout(
        &self,
        name: &'static str,
        major: u8,
        len: usize,
    ) -> Result<&[u8], SnapshotError> {
        if self.name != name {
            return Err(SnapshotError::UnknownModule(self.name.clone()));
        }
        if self.major != major {
            return Err(SnapshotError::VersionMismatch {
                module: self.name.clone(),
                major: self.major,
                minor: self.minor,
            });
        }
        self.data.get(..len).ok_or(SnapshotError::Truncated {
            module: name,
            expected: len,
            found: self.data.len(),
        })
    }
}

/// Saved state of a whole session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Host cycle at which the snapshot was taken.
    pub clock: Cycle,
    /// Cable slot bytes (`[host, drive...]`).
    pub cable: ModuleBlob,
    /// Resource keys of every active user-port device, stateless ones included, in
    /// registration order.
    pub resources: Vec<String>,
    /// One blob per active stateful device, in registration order.
    pub devices: Vec<ModuleBlob>,
}

impl SessionSnapshot {
    /// Module name of the cable blob.
    pub const CABLE_MODULE: &'static str = "PARALLEL_CABLE";
    /// Major version of the cable layout.
    pub const CABLE_MAJOR: u8 = 1;
    /// Minor version of the cable layout.
    pub const CABLE_MINOR: u8 = 0;

    /// Serializes to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Container`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Container`] if `text` is not a snapshot.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }
}
