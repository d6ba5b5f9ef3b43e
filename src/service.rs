//! One-shot OTA flow: gate, link wait, check, apply.

use crate::applier::UpdateApplier;
use crate::checker::{UpdateChecker, UpdateDecision};
use crate::config::OtaConfig;
use crate::error::UpdateError;
use crate::platform::{HttpFetch, LinkState, SystemControl, UpdateSlot};
use std::sync::{Mutex, TryLockError};
use std::time::Duration;

struct Collaborators<H, L, S, R> {
    http: H,
    link: L,
    slot: S,
    system: R,
}

/// Drives the whole update flow against a set of collaborators.
///
/// There is one update slot and one network stack, so at most one check or
/// apply may be in flight device-wide. The collaborators live behind a
/// single-permit gate; a second caller gets [`UpdateError::Busy`] instead of
/// a second flash writer.
pub struct OtaService<H, L, S, R> {
    checker: UpdateChecker,
    link_timeout: Duration,
    inner: Mutex<Collaborators<H, L, S, R>>,
}

impl<H, L, S, R> OtaService<H, L, S, R>
where
    H: HttpFetch,
    L: LinkState,
    S: UpdateSlot,
    R: SystemControl,
{
    pub fn new(config: &OtaConfig, http: H, link: L, slot: S, system: R) -> Self {
        Self {
            checker: UpdateChecker::new(config),
            link_timeout: config.link_timeout(),
            inner: Mutex::new(Collaborators {
                http,
                link,
                slot,
                system,
            }),
        }
    }

    /// Run one check-and-maybe-apply cycle.
    ///
    /// Waits (bounded) for the link, checks the manifest, and feeds a
    /// positive decision straight into the applier. The decision is consumed
    /// within the same run and never stored, so a decision computed before
    /// the current boot can never trigger a blind apply.
    ///
    /// Returns `Ok(NoUpdate)` when the device is already current; does not
    /// return at all when an update is applied, because the device restarts.
    pub fn run_once(&self) -> Result<UpdateDecision, UpdateError> {
        let mut inner = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(UpdateError::Busy),
            // A previous run panicked mid-flight; the slot protocol recovers
            // via begin(), so the permit itself is still usable.
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };

        if !inner.link.wait_until_up(self.link_timeout) {
            log::warn!("network link not up, skipping update check");
            return Err(UpdateError::LinkTimeout(self.link_timeout));
        }

        match self.checker.check(&mut inner.http)? {
            UpdateDecision::NoUpdate => Ok(UpdateDecision::NoUpdate),
            UpdateDecision::UpdateAvailable { uri } => {
                let Collaborators {
                    http, slot, system, ..
                } = &mut *inner;
                let never = UpdateApplier::new().apply(&uri, http, slot, system)?;
                match never {}
            }
        }
    }
}
