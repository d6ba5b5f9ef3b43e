//! Update manifest: `{"version": <number>, "uri": "<string>"}`.

use crate::error::UpdateError;
use crate::version::FirmwareVersion;
use serde_json::Value;

/// Decoded manifest body. Transient: parsed, compared, discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Version of the firmware the server is advertising.
    pub version: FirmwareVersion,
    /// Location of the binary image, when the server provided one.
    pub uri: Option<String>,
}

impl Manifest {
    /// Parse a fetched manifest body.
    ///
    /// Parsing is two-stage so the caller can tell a broken document from a
    /// broken schema: invalid JSON is [`UpdateError::ManifestParse`], while a
    /// well-formed document with a missing or non-integer `version` is
    /// [`UpdateError::ManifestField`]. The `uri` field is checked lazily via
    /// [`Manifest::binary_uri`] because a manifest at or below the running
    /// version never needs one.
    pub fn parse(body: &[u8]) -> Result<Self, UpdateError> {
        let doc: Value = serde_json::from_slice(body)?;

        let version = doc
            .get("version")
            .ok_or(UpdateError::ManifestField("version field is missing"))?
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(UpdateError::ManifestField(
                "version is not an unsigned integer",
            ))?;

        let uri = doc
            .get("uri")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(Self {
            version: FirmwareVersion(version),
            uri,
        })
    }

    /// Binary location, required once the version comparison calls for an
    /// update. Missing, non-string, or empty values are field errors, never
    /// an empty-URI update.
    pub fn binary_uri(&self) -> Result<&str, UpdateError> {
        match self.uri.as_deref() {
            Some(uri) if !uri.is_empty() => Ok(uri),
            _ => Err(UpdateError::ManifestField("uri is missing or empty")),
        }
    }
}
