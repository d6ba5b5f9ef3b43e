//! Apply an update: stream the image into the inactive slot and reboot.

use crate::error::UpdateError;
use crate::platform::{HttpFetch, SystemControl, UpdateSlot};
use std::convert::Infallible;

// Progress is logged once per this many bytes written.
const PROGRESS_LOG_STEP: usize = 64 * 1024;

/// Streams a firmware image into the inactive slot.
///
/// Single attempt, no resumption: any failure aborts the slot, leaves the
/// running image as the boot target, and returns to the caller, which may
/// restart the whole flow from the manifest check.
pub struct UpdateApplier;

impl UpdateApplier {
    pub fn new() -> Self {
        Self
    }

    /// Download `binary_uri` straight into the inactive slot, finalize it,
    /// and restart into the new image.
    ///
    /// Does not return on success; the `Infallible` success type exists so
    /// callers cannot write an after-restart path. The image is never
    /// buffered whole: each received chunk goes directly to the slot writer.
    pub fn apply(
        &mut self,
        binary_uri: &str,
        http: &mut dyn HttpFetch,
        slot: &mut dyn UpdateSlot,
        system: &mut dyn SystemControl,
    ) -> Result<Infallible, UpdateError> {
        log::info!("starting firmware update from {binary_uri}");
        slot.begin()?;

        let mut written = 0usize;
        let streamed = http.get(binary_uri, &mut |chunk| {
            slot.write(chunk)?;
            let before = written;
            written += chunk.len();
            if written / PROGRESS_LOG_STEP != before / PROGRESS_LOG_STEP {
                log::debug!("update progress: {written} bytes written");
            }
            Ok(())
        });

        if let Err(err) = streamed {
            slot.abort();
            log::error!("firmware download failed after {written} bytes: {err}");
            return Err(err);
        }

        // Integrity check and boot-target switch happen together; a slot that
        // fails here is never bootable.
        if let Err(err) = slot.finalize() {
            slot.abort();
            log::error!("new image rejected: {err}");
            return Err(err.into());
        }

        log::info!("update complete ({written} bytes), restarting into new image");
        system.restart()
    }
}

impl Default for UpdateApplier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SlotError, TransportError};

    /// Serves `body`, then optionally reports a transport drop.
    struct FlakyHttp {
        body: Vec<u8>,
        drop_after: Option<usize>,
    }

    impl HttpFetch for FlakyHttp {
        fn get(
            &mut self,
            _uri: &str,
            sink: &mut dyn FnMut(&[u8]) -> Result<(), UpdateError>,
        ) -> Result<(), UpdateError> {
            let served = match self.drop_after {
                Some(n) => &self.body[..n.min(self.body.len())],
                None => &self.body[..],
            };
            for chunk in served.chunks(4) {
                sink(chunk)?;
            }
            if self.drop_after.is_some() {
                return Err(TransportError::Timeout.into());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeSlot {
        image: Vec<u8>,
        open: bool,
        bootable: bool,
        aborted: bool,
        fail_finalize: bool,
    }

    impl UpdateSlot for FakeSlot {
        fn begin(&mut self) -> Result<(), SlotError> {
            self.open = true;
            self.image.clear();
            Ok(())
        }

        fn write(&mut self, chunk: &[u8]) -> Result<(), SlotError> {
            if !self.open {
                return Err(SlotError::Write);
            }
            self.image.extend_from_slice(chunk);
            Ok(())
        }

        fn finalize(&mut self) -> Result<(), SlotError> {
            if !self.open || self.fail_finalize {
                return Err(SlotError::Validate);
            }
            self.open = false;
            self.bootable = true;
            Ok(())
        }

        fn abort(&mut self) {
            self.open = false;
            self.aborted = true;
            self.image.clear();
        }
    }

    struct PanicRestart;

    impl SystemControl for PanicRestart {
        fn restart(&mut self) -> ! {
            panic!("restart requested")
        }
    }

    #[test]
    fn mid_stream_drop_leaves_slot_unbootable() {
        let mut http = FlakyHttp {
            body: b"firmware-image-bytes".to_vec(),
            drop_after: Some(9),
        };
        let mut slot = FakeSlot::default();
        let mut system = PanicRestart;

        let err = UpdateApplier::new()
            .apply("https://x/fw.bin", &mut http, &mut slot, &mut system)
            .unwrap_err();

        assert!(matches!(err, UpdateError::Transport(_)));
        assert!(!slot.bootable);
        assert!(slot.aborted);
    }

    #[test]
    fn failed_validation_never_marks_the_slot() {
        let mut http = FlakyHttp {
            body: b"firmware-image-bytes".to_vec(),
            drop_after: None,
        };
        let mut slot = FakeSlot {
            fail_finalize: true,
            ..Default::default()
        };
        let mut system = PanicRestart;

        let err = UpdateApplier::new()
            .apply("https://x/fw.bin", &mut http, &mut slot, &mut system)
            .unwrap_err();

        assert!(matches!(err, UpdateError::Apply(SlotError::Validate)));
        assert!(!slot.bootable);
    }

    #[test]
    #[should_panic(expected = "restart requested")]
    fn successful_apply_restarts() {
        let mut http = FlakyHttp {
            body: b"firmware-image-bytes".to_vec(),
            drop_after: None,
        };
        let mut slot = FakeSlot::default();
        let mut system = PanicRestart;

        let _ = UpdateApplier::new().apply("https://x/fw.bin", &mut http, &mut slot, &mut system);
    }
}
