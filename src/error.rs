//! Unified error types for the enrollee onboarding agent.
//!
//! A single `Error` enum that every component converts into, so the
//! onboarding controller's failure handling stays uniform.  All variants
//! are `Copy` so they can be returned from the retry loops and stored in
//! an [`OnboardingReport`](crate::app::service::OnboardingReport) without
//! allocation.

use core::fmt;

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level onboarding error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Radio driver missing, uninitialised, or serving another adapter.
    /// Fatal for the attempt; never retried.
    AdapterUnavailable,
    /// Scan completed without seeing the target.  Absorbed by the scan loop.
    NotFoundYet,
    /// Association requested but not confirmed yet.  Absorbed by the
    /// connect loop until its attempt budget runs out.
    AssociationPending,
    /// Identity query on an adapter that is not associated (or not the
    /// adapter the query was built for).
    NotConnected,
    /// Joined network name does not fit in a [`NetworkName`](crate::app::types::NetworkName).
    NameTooLong,
    /// A bounded retry loop ran out of attempts or hit its deadline.
    Timeout,
    /// The caller's cancel token fired during a wait.
    Cancelled,
    /// Another onboarding attempt already holds the radio.
    Busy,
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdapterUnavailable => write!(f, "adapter unavailable"),
            Self::NotFoundYet => write!(f, "target network not found yet"),
            Self::AssociationPending => write!(f, "association pending"),
            Self::NotConnected => write!(f, "adapter not connected"),
            Self::NameTooLong => write!(f, "network name too long"),
            Self::Timeout => write!(f, "retries exhausted"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Busy => write!(f, "onboarding already in progress"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl Error {
    /// Transient conditions that the retry loops swallow.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::NotFoundYet | Self::AssociationPending)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(field) => Self::Config(field),
            ConfigError::Malformed => Self::Config("malformed document"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
