use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Single-slot in-flight guard for form submissions.
///
/// At most one submission per workflow instance may be outstanding; a
/// second `begin` is rejected until the first token drops.
#[derive(Debug, Default, Clone)]
pub struct SubmissionSlot {
    busy: Arc<AtomicBool>,
}

/// Token held for the duration of a submission; dropping it frees the slot.
#[derive(Debug)]
pub struct SubmissionToken {
    busy: Arc<AtomicBool>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("a submission is already in flight")]
pub struct Busy;

impl SubmissionSlot {
    pub fn begin(&self) -> Result<SubmissionToken, Busy> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Ok(SubmissionToken {
                busy: self.busy.clone(),
            })
        } else {
            Err(Busy)
        }
    }
}

impl Drop for SubmissionToken {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
