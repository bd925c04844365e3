//! Bounded connect-with-retry against one target network.
//!
//! ## Retry policy
//!
//! Each cycle re-issues the association request, waits the settle window
//! (`connect_settle_ms`, 10 s by default), then checks link status.  The
//! request is re-sent every cycle rather than only polled, since some
//! radios drop a pending association silently.  After
//! `max_connect_attempts` cycles without association the pending request
//! is torn down and the loop fails with [`Error::Timeout`].  A cancelled
//! settle window tears it down the same way before returning
//! [`Error::Cancelled`].

use log::{info, warn};

use crate::app::ports::{Clock, RadioDriver};
use crate::app::types::{ConnectivityAdapter, LinkStatus, LocalAddress, TargetNetwork};
use crate::config::OnboardingConfig;
use crate::error::{Error, Result};
use crate::retry::{CancelToken, wait};

/// What a successful negotiation observed.  Owned by the attempt that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Association {
    /// Association requests issued, including the successful one.
    pub attempts: u32,
    /// Local address read once on the associated transition.
    pub local_address: Option<LocalAddress>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConnectionNegotiator {
    settle_ms: u32,
    max_attempts: u32,
    slice_ms: u32,
}

impl ConnectionNegotiator {
    pub fn new(config: &OnboardingConfig) -> Self {
        Self {
            settle_ms: config.connect_settle_ms,
            max_attempts: config.max_connect_attempts.max(1),
            slice_ms: config.wait_slice_ms,
        }
    }

    /// Drive `radio` until it reports [`LinkStatus::Associated`].
    ///
    /// Fails with [`Error::AdapterUnavailable`] if the radio serves another
    /// adapter, [`Error::Cancelled`] if `cancel` fires during a settle
    /// window, or [`Error::Timeout`] once the attempt budget is spent.
    pub fn connect(
        &self,
        radio: &mut impl RadioDriver,
        clock: &impl Clock,
        target: &TargetNetwork,
        adapter: ConnectivityAdapter,
        cancel: &CancelToken,
    ) -> Result<Association> {
        if radio.adapter() != adapter {
            return Err(Error::AdapterUnavailable);
        }

        for attempt in 1..=self.max_attempts {
            info!(
                "Connect: attempt {}/{} to '{}'",
                attempt,
                self.max_attempts,
                target.name()
            );

            if let Err(e) = radio.request_association(target.name(), target.secret()) {
                warn!("Connect: request failed ({}), treating as pending", e);
            }

            if let Err(e) = wait(clock, self.settle_ms, self.slice_ms, cancel, None) {
                warn!("Connect: '{}' abandoned ({}), dropping association", target.name(), e);
                radio.disconnect();
                return Err(e);
            }

            if radio.status() == LinkStatus::Associated {
                let local_address = radio.local_address();
                match local_address {
                    Some(addr) => info!("Connect: associated, address {}", addr),
                    None => info!("Connect: associated, no address yet"),
                }
                return Ok(Association {
                    attempts: attempt,
                    local_address,
                });
            }
        }

        warn!(
            "Connect: '{}' not associated after {} attempt(s), giving up",
            target.name(),
            self.max_attempts
        );
        radio.disconnect();
        Err(Error::Timeout)
    }
}
