// Centralized firmware version information

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cargo package version from Cargo.toml
pub const CARGO_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version number of a firmware image.
///
/// The running value is compiled into the image; manifests advertise one for
/// the latest available build. An update happens only on a strict
/// greater-than comparison, so equal versions never re-flash.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct FirmwareVersion(pub u32);

impl FirmwareVersion {
    pub const fn new(version: u32) -> Self {
        Self(version)
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FirmwareVersion {
    fn from(version: u32) -> Self {
        Self(version)
    }
}
