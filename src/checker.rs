//! Manifest check: fetch, parse, decide.

use crate::config::OtaConfig;
use crate::error::UpdateError;
use crate::manifest::Manifest;
use crate::platform::HttpFetch;
use crate::version::FirmwareVersion;

/// Outcome of one manifest check. Consumed immediately; never persisted
/// across boots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    /// The advertised version is at or below the running one.
    NoUpdate,
    /// A strictly newer image is available at `uri`.
    UpdateAvailable { uri: String },
}

/// Fetches the JSON manifest and decides whether an update is warranted.
///
/// Checking has no side effect beyond the network fetch, so repeated checks
/// against an unchanged manifest always reach the same decision.
pub struct UpdateChecker {
    manifest_uri: String,
    running: FirmwareVersion,
    limit: usize,
}

impl UpdateChecker {
    pub fn new(config: &OtaConfig) -> Self {
        Self {
            manifest_uri: config.manifest_uri.clone(),
            running: config.current_version,
            limit: config.manifest_limit,
        }
    }

    /// Fetch the manifest and evaluate it against the running version.
    pub fn check(&self, http: &mut dyn HttpFetch) -> Result<UpdateDecision, UpdateError> {
        let body = self.fetch_manifest(http)?;
        self.evaluate(&body)
    }

    /// Accumulate the manifest body, refusing anything over the configured
    /// limit. The fetch is aborted the moment the bound would be exceeded,
    /// never truncated into a garbage decision.
    fn fetch_manifest(&self, http: &mut dyn HttpFetch) -> Result<Vec<u8>, UpdateError> {
        let limit = self.limit;
        let mut body = Vec::new();
        http.get(&self.manifest_uri, &mut |chunk| {
            if body.len() + chunk.len() > limit {
                return Err(UpdateError::ResponseTooLarge { limit });
            }
            body.extend_from_slice(chunk);
            Ok(())
        })?;
        Ok(body)
    }

    fn evaluate(&self, body: &[u8]) -> Result<UpdateDecision, UpdateError> {
        let manifest = Manifest::parse(body)?;
        log::info!(
            "current fw ver {}, available fw ver {}",
            self.running,
            manifest.version
        );

        if manifest.version > self.running {
            let uri = manifest.binary_uri()?.to_owned();
            log::info!("upgrading, firmware uri: {uri}");
            Ok(UpdateDecision::UpdateAvailable { uri })
        } else {
            log::info!("not upgrading, upgrade is not needed");
            Ok(UpdateDecision::NoUpdate)
        }
    }
}
