//! Port traits: the hexagonal boundary between the onboarding core and
//! the platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ OnboardingController (domain)
//! ```
//!
//! Driven adapters (radio drivers, clocks, event sinks, status reporters)
//! implement these traits.  The controller consumes them via generics, so
//! the domain core never touches the radio directly.
//!
//! ## Security notes
//!
//! - **RadioDriver** implementations MUST NOT log the association secret.
//! - **StatusReporter** implementations receive only the target name,
//!   never the secret.

use super::events::{OnboardingEvent, OnboardingResult};
use super::types::{ConnectivityAdapter, LinkStatus, LocalAddress, NetworkIdentity, ScanEntry};

// ───────────────────────────────────────────────────────────────
// Radio driver port (driven adapter: domain ↔ radio)
// ───────────────────────────────────────────────────────────────

/// Capability set the core needs from one connectivity adapter.
///
/// Calls are blocking.  The controller holds the driver exclusively for
/// the duration of one onboarding attempt.
pub trait RadioDriver: Send {
    /// The adapter class this driver serves.
    fn adapter(&self) -> ConnectivityAdapter;

    /// Whether the radio hardware is present and initialised.
    fn is_present(&mut self) -> bool;

    /// Enumerate visible networks.  An `Err` means the enumeration itself
    /// produced no usable result.
    fn scan(&mut self) -> Result<Vec<ScanEntry>, DriverError>;

    /// Ask the radio to associate.  Returns once the request is issued,
    /// not once associated.
    fn request_association(&mut self, name: &str, secret: &str) -> Result<(), DriverError>;

    fn status(&self) -> LinkStatus;

    /// Address of the local interface, if one has been assigned.
    fn local_address(&self) -> Option<LocalAddress>;

    /// Name of the network currently joined, as reported by the radio.
    fn joined_network(&self) -> Option<String>;

    fn disconnect(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → timer)
// ───────────────────────────────────────────────────────────────

/// Monotonic time and blocking delay.
pub trait Clock: Sync {
    fn now_ms(&self) -> u64;

    fn sleep_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → caller)
// ───────────────────────────────────────────────────────────────

/// The controller emits [`OnboardingEvent`]s through this port,
/// synchronously, on its own thread.  Implementations must not block.
pub trait EventSink {
    fn emit(&mut self, event: OnboardingEvent);
}

impl<F: FnMut(OnboardingEvent)> EventSink for F {
    fn emit(&mut self, event: OnboardingEvent) {
        self(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Status reporter port (driven adapter: domain → provisioning layer)
// ───────────────────────────────────────────────────────────────

/// Hands terminal onboarding state to the provisioning-status layer,
/// which exposes it to remote clients.  The core produces values only;
/// serialization and transport belong to the implementation.
pub trait StatusReporter {
    fn report_result(
        &mut self,
        target_name: &str,
        adapter: ConnectivityAdapter,
        result: OnboardingResult,
    );

    fn report_identity(&mut self, identity: &NetworkIdentity);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`RadioDriver`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// Radio absent or not started.
    NotPresent,
    /// Scan returned no usable list.
    ScanFailed,
    /// The radio rejected the association request.
    Rejected,
    /// Generic platform error.
    IoError,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotPresent => write!(f, "radio not present"),
            Self::ScanFailed => write!(f, "scan failed"),
            Self::Rejected => write!(f, "association request rejected"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
