//! Optional retry wrapper around the manifest check.
//!
//! The core contract is single-attempt; this layer adds bounded exponential
//! backoff for transport failures only. Schema problems (bad JSON, bad
//! fields, oversized body) come back unchanged on the first attempt, since
//! retrying the same broken manifest cannot help.

use crate::checker::{UpdateChecker, UpdateDecision};
use crate::error::UpdateError;
use crate::platform::HttpFetch;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
        }
    }
}

/// Run `checker` until it reaches a decision or a non-transport error, or
/// until the attempt budget is exhausted.
pub fn check_with_backoff(
    checker: &UpdateChecker,
    http: &mut dyn HttpFetch,
    policy: &BackoffPolicy,
) -> Result<UpdateDecision, UpdateError> {
    let mut delay = policy.initial_delay;
    let mut attempt = 1u32;

    loop {
        match checker.check(http) {
            Err(UpdateError::Transport(err)) if attempt < policy.max_attempts => {
                log::warn!(
                    "manifest fetch failed (attempt {attempt}/{}): {err}, retrying in {:?}",
                    policy.max_attempts,
                    delay
                );
                thread::sleep(delay);
                delay = delay.saturating_mul(2).min(policy.max_delay);
                attempt += 1;
            }
            outcome => return outcome,
        }
    }
}
