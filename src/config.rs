/// Boot-time OTA configuration.
///
/// On the device every field is fixed at build time (the manifest URI, the
/// compiled-in version, the server root CA). The struct exists so the device
/// glue and the update core read the same values, and so the glue can build
/// its TLS client from the same trust anchor the core was configured with.
use crate::version::FirmwareVersion;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for the manifest response body. Matches the HTTP receive
/// buffer the firmware uses for its other small JSON fetches.
pub const DEFAULT_MANIFEST_LIMIT: usize = 4096;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OtaConfig {
    /// HTTPS location of the JSON manifest.
    pub manifest_uri: String,
    /// Version compiled into the running image.
    pub current_version: FirmwareVersion,
    /// Largest manifest body the checker will accept.
    pub manifest_limit: usize,
    /// How long a run waits for the link before giving up.
    pub link_timeout_secs: u32,
    /// PEM root certificate handed to the HTTPS collaborator.
    pub server_root_ca_pem: String,
}

impl OtaConfig {
    pub fn link_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.link_timeout_secs))
    }
}

impl Default for OtaConfig {
    fn default() -> Self {
        Self {
            manifest_uri: String::new(),
            current_version: FirmwareVersion::default(),
            manifest_limit: DEFAULT_MANIFEST_LIMIT,
            link_timeout_secs: 30,
            server_root_ca_pem: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_serialization_round_trips() {
        let config = OtaConfig {
            manifest_uri: "https://updates.example/manifest.json".into(),
            current_version: FirmwareVersion(3),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: OtaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn defaults_are_bounded() {
        let config = OtaConfig::default();
        assert_eq!(config.manifest_limit, DEFAULT_MANIFEST_LIMIT);
        assert_eq!(config.link_timeout(), Duration::from_secs(30));
    }
}
