//! Onboarding configuration parameters
//!
//! All tunable timing for the scan and connect loops.  Defaults are a
//! 1 s pause between scans and a 10 s settle window after each
//! association request.  Values can be overlaid from a
//! bundle's property map (see [`OnboardingConfig::from_properties`]).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::bundle::PropertyMap;

/// Core onboarding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    // --- Discovery ---
    /// Pause between two scans that missed the target (milliseconds)
    pub scan_interval_ms: u32,
    /// Give up scanning after this long; `None` scans until cancelled
    pub scan_timeout_ms: Option<u32>,

    // --- Association ---
    /// Wait after each association request before checking link status
    pub connect_settle_ms: u32,
    /// Association requests issued before the connect loop gives up
    pub max_connect_attempts: u32,

    // --- Timing ---
    /// Granularity at which waits check for cancellation and deadlines
    pub wait_slice_ms: u32,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            // Discovery
            scan_interval_ms: 1_000,
            scan_timeout_ms: None,

            // Association
            connect_settle_ms: 10_000,
            max_connect_attempts: 6, // one minute of settle windows

            // Timing
            wait_slice_ms: 100,
        }
    }
}

impl OnboardingConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("scan_interval_ms"));
        }
        if self.scan_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed("scan_timeout_ms"));
        }
        if self.connect_settle_ms == 0 {
            return Err(ConfigError::ValidationFailed("connect_settle_ms"));
        }
        if self.max_connect_attempts == 0 {
            return Err(ConfigError::ValidationFailed("max_connect_attempts"));
        }
        if self.wait_slice_ms == 0
            || self.wait_slice_ms > self.scan_interval_ms.min(self.connect_settle_ms)
        {
            return Err(ConfigError::ValidationFailed("wait_slice_ms"));
        }
        Ok(())
    }

    /// Overlay the camel-case keys of a bundle property map onto the
    /// defaults, then validate.  Unknown keys are ignored.
    pub fn from_properties(props: &PropertyMap) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(v) = props.get("scanIntervalMs") {
            cfg.scan_interval_ms = parse_u32(v, "scan_interval_ms")?;
        }
        if let Some(v) = props.get("scanTimeoutMs") {
            cfg.scan_timeout_ms = Some(parse_u32(v, "scan_timeout_ms")?);
        }
        if let Some(v) = props.get("connectSettleMs") {
            cfg.connect_settle_ms = parse_u32(v, "connect_settle_ms")?;
        }
        if let Some(v) = props.get("maxConnectAttempts") {
            cfg.max_connect_attempts = parse_u32(v, "max_connect_attempts")?;
        }
        if let Some(v) = props.get("waitSliceMs") {
            cfg.wait_slice_ms = parse_u32(v, "wait_slice_ms")?;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_u32(raw: &str, field: &'static str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ValidationFailed(field))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation or could not be parsed.
    /// The `&'static str` names the field.
    ValidationFailed(&'static str),
    /// A configuration document did not have the expected shape.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(field) => write!(f, "validation failed: {}", field),
            Self::Malformed => write!(f, "malformed configuration document"),
        }
    }
}
