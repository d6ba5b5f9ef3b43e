//! Error taxonomy for the update flow.
//!
//! Every variant is non-fatal to the device: the caller decides whether to
//! retry, skip, or keep running the booted image. Only a successful apply
//! ends the process, and it does so via restart, not via an error path.

use std::time::Duration;
use thiserror::Error;

/// Failure reported by the HTTPS collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Failure reported by the flash-slot collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("could not open the inactive slot for writing")]
    Begin,
    #[error("flash write failed")]
    Write,
    #[error("image failed validation")]
    Validate,
    #[error("could not mark the new slot bootable")]
    SetBoot,
}

#[derive(Debug, Error)]
pub enum UpdateError {
    /// Network problem while fetching the manifest or the image. Safe to
    /// retry with backoff.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The manifest body exceeded the bounded receive buffer. Retrying with
    /// the same parameters will not help.
    #[error("manifest response exceeds the {limit}-byte receive buffer")]
    ResponseTooLarge { limit: usize },

    /// The manifest body is not valid JSON.
    #[error("cannot parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// The manifest is well-formed JSON but does not match the expected
    /// schema (missing/non-integer `version`, unusable `uri`).
    #[error("manifest field error: {0}")]
    ManifestField(&'static str),

    /// Streaming or finalizing the new image failed. The previously active
    /// slot remains the boot target; the whole flow may be retried from
    /// scratch.
    #[error("update apply failed: {0}")]
    Apply(#[from] SlotError),

    /// The network link did not come up within the configured wait.
    #[error("network link not up within {0:?}")]
    LinkTimeout(Duration),

    /// Another check or apply already holds the single in-flight permit.
    #[error("an update check or apply is already in flight")]
    Busy,
}
