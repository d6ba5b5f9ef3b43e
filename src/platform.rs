//! Collaborator seams owned by the device glue.
//!
//! On the target these are backed by the vendor SDK (HTTPS client, OTA
//! partition API, netif events, `esp_restart`). On the host they are backed
//! by mocks, which is what makes the whole flow testable without hardware.

use crate::error::{SlotError, UpdateError};
use std::time::Duration;

/// Streaming HTTPS GET.
///
/// Implementations own the TLS session and are handed the trust anchor at
/// construction time. Certificate and hostname validation are part of the
/// contract and always enforced; the core offers no way to turn them off.
pub trait HttpFetch {
    /// Fetch `uri`, forwarding each received body chunk to `sink` in order.
    ///
    /// Transport problems (connect, TLS, timeout, non-2xx status) surface as
    /// [`UpdateError::Transport`]. An error returned by `sink` aborts the
    /// transfer and is propagated unchanged. Requests must carry a bounded
    /// timeout; an unbounded network wait is not an acceptable implementation.
    fn get(
        &mut self,
        uri: &str,
        sink: &mut dyn FnMut(&[u8]) -> Result<(), UpdateError>,
    ) -> Result<(), UpdateError>;
}

/// Write access to the inactive firmware slot.
///
/// Exactly one apply may drive a slot at a time; the service layer enforces
/// this with a single-permit gate.
pub trait UpdateSlot {
    /// Open the inactive slot for a fresh image, discarding previous content.
    fn begin(&mut self) -> Result<(), SlotError>;

    /// Append a chunk of image bytes.
    fn write(&mut self, chunk: &[u8]) -> Result<(), SlotError>;

    /// Validate the received image and mark the slot as the next boot target.
    ///
    /// Must be all-or-nothing: after an error the slot is not bootable and
    /// the currently running image remains the boot target.
    fn finalize(&mut self) -> Result<(), SlotError>;

    /// Discard any partially written image. Idempotent, and safe to call
    /// whether or not `begin` succeeded.
    fn abort(&mut self);
}

/// View of the network link, owned by the link-management task.
pub trait LinkState {
    /// Block until the link is up with an address, or until `timeout`
    /// expires. Returns whether the link came up.
    fn wait_until_up(&mut self, timeout: Duration) -> bool;
}

/// Process-level control.
pub trait SystemControl {
    /// Reboot into the freshly marked slot. Never returns.
    fn restart(&mut self) -> !;
}
