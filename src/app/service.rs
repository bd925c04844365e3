//! Onboarding controller, the hexagonal core.
//!
//! [`OnboardingController`] owns the radio driver and a clock and runs one
//! onboarding attempt at a time:
//!
//! ```text
//!  onboard()
//!     │  precondition: radio present and serving the adapter
//!     ▼
//!  Scanning ── miss ──▶ wait scan_interval ──┐   (cancellable, optional deadline)
//!     ▲                                      │
//!     └──────────────────────────────────────┘
//!     │ hit → emit NetworkFound
//!     ▼
//!  Connecting ── ConnectionNegotiator (bounded) ── NetworkInfoQuery
//!     │
//!     ▼
//!  emit NetworkConnected | NetworkNotConnected
//! ```
//!
//! The radio sits behind a mutex; a second attempt while one is in flight
//! is rejected with [`Error::Busy`] rather than queued.

use std::sync::{Mutex, MutexGuard, TryLockError};

use log::{error, info, warn};

use crate::config::OnboardingConfig;
use crate::error::{Error, Result};
use crate::fsm::{OnboardingFsm, OnboardingState, Outcome};
use crate::network::info::NetworkInfoQuery;
use crate::network::negotiator::{Association, ConnectionNegotiator};
use crate::network::scanner::NetworkScanner;
use crate::retry::{CancelToken, Deadline, wait};

use super::events::{OnboardingEvent, OnboardingResult};
use super::ports::{Clock, EventSink, RadioDriver, StatusReporter};
use super::types::{ConnectivityAdapter, LinkStatus, NetworkIdentity, NetworkName, TargetNetwork};

// ───────────────────────────────────────────────────────────────
// Report
// ───────────────────────────────────────────────────────────────

/// Everything one attempt produced.  Callers that only need the terminal
/// value use [`OnboardingController::onboard`].
#[derive(Debug, Clone)]
pub struct OnboardingReport {
    pub target_name: NetworkName,
    pub adapter: ConnectivityAdapter,
    pub result: OnboardingResult,
    /// Why the attempt failed, if it did.
    pub failure: Option<Error>,
    /// Present only after a confirmed association.
    pub identity: Option<NetworkIdentity>,
    pub association: Option<Association>,
    /// Scans issued, including the one that found the target.
    pub scan_attempts: u32,
    fsm: OnboardingFsm,
}

impl OnboardingReport {
    /// States visited, starting with `Idle` and ending in `Done`.
    pub fn trace(&self) -> &[OnboardingState] {
        self.fsm.trace()
    }

    /// Hand the terminal result (and identity, on success) to the
    /// provisioning-status layer.
    pub fn publish(&self, reporter: &mut impl StatusReporter) {
        reporter.report_result(&self.target_name, self.adapter, self.result);
        if let Some(identity) = &self.identity {
            reporter.report_identity(identity);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct OnboardingController<D, C> {
    radio: Mutex<D>,
    clock: C,
    config: OnboardingConfig,
    scanner: NetworkScanner,
    negotiator: ConnectionNegotiator,
}

impl<D: RadioDriver, C: Clock> OnboardingController<D, C> {
    /// Build a controller around `radio`.  Rejects an invalid config.
    pub fn new(radio: D, clock: C, config: OnboardingConfig) -> Result<Self> {
        config.validate()?;
        let negotiator = ConnectionNegotiator::new(&config);
        Ok(Self {
            radio: Mutex::new(radio),
            clock,
            config,
            scanner: NetworkScanner::new(),
            negotiator,
        })
    }

    pub fn config(&self) -> &OnboardingConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one attempt to completion and return only the terminal result.
    pub fn onboard(
        &self,
        target: &TargetNetwork,
        adapter: ConnectivityAdapter,
        sink: &mut impl EventSink,
    ) -> OnboardingResult {
        self.run(target, adapter, sink, &CancelToken::new()).result
    }

    /// Run one attempt, abortable through `cancel`.
    pub fn run(
        &self,
        target: &TargetNetwork,
        adapter: ConnectivityAdapter,
        sink: &mut impl EventSink,
        cancel: &CancelToken,
    ) -> OnboardingReport {
        let mut report = OnboardingReport {
            target_name: target.network_name().clone(),
            adapter,
            result: OnboardingResult::Error,
            failure: None,
            identity: None,
            association: None,
            scan_attempts: 0,
            fsm: OnboardingFsm::new(),
        };

        let mut guard = match self.lock_radio() {
            Ok(g) => g,
            Err(e) => {
                warn!("Onboarding: rejected, {}", e);
                return fail_before_discovery(report, e);
            }
        };
        let radio = &mut *guard;

        // ── Idle → Scanning ──────────────────────────────────
        if !radio.is_present() || radio.adapter() != adapter {
            error!("Onboarding: {} radio not present", adapter);
            return fail_before_discovery(report, Error::AdapterUnavailable);
        }

        report.fsm.transition(OnboardingState::Scanning);
        info!("Onboarding: looking for '{}' on {}", target.name(), adapter);

        let deadline = self
            .config
            .scan_timeout_ms
            .map(|ms| Deadline::after(&self.clock, ms));

        loop {
            if cancel.is_cancelled() {
                return fail_before_discovery(report, Error::Cancelled);
            }
            report.scan_attempts += 1;
            if self.scanner.scan_for(radio, target, adapter) {
                break;
            }
            if let Err(e) = wait(
                &self.clock,
                self.config.scan_interval_ms,
                self.config.wait_slice_ms,
                cancel,
                deadline,
            ) {
                warn!(
                    "Onboarding: scan stopped after {} attempt(s), {}",
                    report.scan_attempts, e
                );
                return fail_before_discovery(report, e);
            }
        }

        // ── Scanning → Found → Connecting ────────────────────
        report.fsm.transition(OnboardingState::Found);
        info!("Onboarding: '{}' found after {} scan(s)", target.name(), report.scan_attempts);
        sink.emit(OnboardingEvent::NetworkFound);

        report.fsm.transition(OnboardingState::Connecting);
        if radio.status() == LinkStatus::Associated {
            info!(
                "Onboarding: dropping current association ({:?})",
                radio.joined_network()
            );
            radio.disconnect();
        }

        let association =
            match self
                .negotiator
                .connect(radio, &self.clock, target, adapter, cancel)
            {
                Ok(a) => a,
                Err(e) => return fail_after_discovery(report, e, sink),
            };
        report.association = Some(association);

        // ── Connecting → Done ────────────────────────────────
        match NetworkInfoQuery::new(adapter).current_identity(&*radio, adapter) {
            Ok(identity) => {
                info!("Onboarding: identity {:?}", identity);
                report.identity = Some(identity);
            }
            Err(_) if radio.status() == LinkStatus::Disconnected => {
                return fail_after_discovery(report, Error::NotConnected, sink);
            }
            // Still associated: no DHCP address yet, or a name too long to report.
            Err(e) => {
                warn!("Onboarding: associated, identity unavailable ({})", e);
            }
        }

        report.fsm.transition(OnboardingState::Done(Outcome::Success));
        report.result = OnboardingResult::NetworkConnected;
        sink.emit(OnboardingEvent::NetworkConnected);
        report
    }

    /// Identity the radio currently observes on `adapter`.
    pub fn current_identity(&self, adapter: ConnectivityAdapter) -> Result<NetworkIdentity> {
        let guard = self.lock_radio()?;
        NetworkInfoQuery::new(guard.adapter()).current_identity(&*guard, adapter)
    }

    /// `Ok` when an identity is available on `adapter`, `Error` otherwise.
    pub fn query_status(&self, adapter: ConnectivityAdapter) -> OnboardingResult {
        match self.current_identity(adapter) {
            Ok(_) => OnboardingResult::Ok,
            Err(e) => {
                info!("Onboarding: no identity on {} ({})", adapter, e);
                OnboardingResult::Error
            }
        }
    }

    /// Run `f` with exclusive access to the radio, unless an attempt holds it.
    pub fn with_radio<R>(&self, f: impl FnOnce(&mut D) -> R) -> Result<R> {
        let mut guard = self.lock_radio()?;
        Ok(f(&mut guard))
    }

    pub fn into_radio(self) -> D {
        self.radio
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_radio(&self) -> Result<MutexGuard<'_, D>> {
        match self.radio.try_lock() {
            Ok(g) => Ok(g),
            // A panicking sink left the radio in whatever state the driver
            // reports; the driver itself is still usable.
            Err(TryLockError::Poisoned(p)) => Ok(p.into_inner()),
            Err(TryLockError::WouldBlock) => Err(Error::Busy),
        }
    }
}

/// Terminal failure with no event: nothing was discovered yet.
fn fail_before_discovery(mut report: OnboardingReport, e: Error) -> OnboardingReport {
    report.fsm.transition(OnboardingState::Done(Outcome::Failure));
    report.result = OnboardingResult::Error;
    report.failure = Some(e);
    report
}

/// Terminal failure after `NetworkFound` was emitted.
fn fail_after_discovery(
    mut report: OnboardingReport,
    e: Error,
    sink: &mut impl EventSink,
) -> OnboardingReport {
    warn!("Onboarding: '{}' not connected, {}", report.target_name, e);
    report.fsm.transition(OnboardingState::Done(Outcome::Failure));
    report.result = OnboardingResult::NetworkNotConnected;
    report.failure = Some(e);
    sink.emit(OnboardingEvent::NetworkNotConnected);
    report
}
