//! OTA Core - hardware-independent firmware update logic for ESP32-class
//! gateways.
//!
//! This crate contains the update decision and apply flow that can be tested
//! on the host platform without requiring device hardware. Everything the
//! vendor SDK owns (TLS transport, flash partition writes, link management,
//! restart) sits behind the traits in [`platform`]; device glue binds them to
//! the ESP-IDF equivalents, tests bind them to mocks.
//!
//! The flow itself is deliberately simple:
//! 1. Wait (bounded) for the network link.
//! 2. Fetch the JSON manifest and compare its version against the running one.
//! 3. If strictly newer, stream the binary into the inactive slot, mark it
//!    bootable, and restart. The running image stays authoritative after any
//!    failure.

pub mod applier;
pub mod checker;
pub mod config;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod retry;
pub mod service;
pub mod version;

pub use applier::UpdateApplier;
pub use checker::{UpdateChecker, UpdateDecision};
pub use config::OtaConfig;
pub use error::{SlotError, TransportError, UpdateError};
pub use manifest::Manifest;
pub use platform::{HttpFetch, LinkState, SystemControl, UpdateSlot};
pub use service::OtaService;
pub use version::FirmwareVersion;
