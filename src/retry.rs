//! Cancellable, deadline-aware waiting for the scan and connect loops.
//!
//! Every pause in the onboarding flow goes through [`wait`], which sleeps
//! in slices of at most `slice_ms` and checks the [`CancelToken`] and the
//! optional [`Deadline`] between slices.  A stuck scan or association can
//! therefore always be aborted from another thread without killing the
//! process.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::app::ports::Clock;
use crate::error::Error;

/// Shared cancellation flag.  Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Absolute point on a [`Clock`] after which a loop must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at_ms: u64,
}

impl Deadline {
    pub fn after(clock: &impl Clock, ms: u32) -> Self {
        Self {
            at_ms: clock.now_ms().saturating_add(u64::from(ms)),
        }
    }

    pub fn expired(self, clock: &impl Clock) -> bool {
        clock.now_ms() >= self.at_ms
    }

    fn remaining_ms(self, clock: &impl Clock) -> u64 {
        self.at_ms.saturating_sub(clock.now_ms())
    }
}

/// Block for `ms`, waking every `slice_ms` to check `cancel` and
/// `deadline`.
///
/// Returns `Err(Cancelled)` as soon as the token is observed, and
/// `Err(Timeout)` once the deadline has passed.  Cancellation wins if both
/// hold.
pub fn wait(
    clock: &impl Clock,
    ms: u32,
    slice_ms: u32,
    cancel: &CancelToken,
    deadline: Option<Deadline>,
) -> Result<(), Error> {
    let slice = slice_ms.max(1);
    let mut left = ms;

    loop {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if let Some(d) = deadline {
            if d.expired(clock) {
                return Err(Error::Timeout);
            }
        }
        if left == 0 {
            return Ok(());
        }

        let mut step = left.min(slice);
        if let Some(d) = deadline {
            step = step.min(d.remaining_ms(clock).min(u64::from(u32::MAX)) as u32);
        }
        clock.sleep_ms(step);
        left -= step;
    }
}
