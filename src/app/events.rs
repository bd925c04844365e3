//! Outbound onboarding events and terminal results.
//!
//! The [`OnboardingController`](super::service::OnboardingController)
//! delivers [`OnboardingEvent`]s through the
//! [`EventSink`](super::ports::EventSink) port at well-defined transition
//! points, then returns one [`OnboardingResult`].  The numeric codes match
//! the easy-setup status values remote provisioning clients expect.

use core::fmt;

/// Lifecycle signals delivered to the caller's sink.
///
/// A successful run emits `NetworkFound` then `NetworkConnected`.  A run
/// that fails after discovery emits `NetworkNotConnected` instead of
/// `NetworkConnected`.  Nothing is emitted before discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingEvent {
    NetworkFound,
    NetworkConnected,
    NetworkNotConnected,
}

impl OnboardingEvent {
    pub const fn code(self) -> i8 {
        match self {
            Self::NetworkFound => 1,
            Self::NetworkConnected => 2,
            Self::NetworkNotConnected => 3,
        }
    }
}

/// Terminal outcome of one onboarding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingResult {
    Ok,
    /// Adapter unusable or a precondition failed before discovery.
    Error,
    NetworkConnected,
    NetworkNotConnected,
}

impl OnboardingResult {
    pub const fn code(self) -> i8 {
        match self {
            Self::Error => -1,
            Self::Ok => 0,
            Self::NetworkConnected => 2,
            Self::NetworkNotConnected => 3,
        }
    }

    pub const fn is_connected(self) -> bool {
        matches!(self, Self::NetworkConnected)
    }
}

impl fmt::Display for OnboardingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Error => write!(f, "ERROR"),
            Self::NetworkConnected => write!(f, "NETWORK_CONNECTED"),
            Self::NetworkNotConnected => write!(f, "NETWORK_NOT_CONNECTED"),
        }
    }
}
