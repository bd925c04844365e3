//! Easy-setup enrollee library.
//!
//! Exposes the onboarding core (scan → associate → identity query) and its
//! adapters for integration testing and for the firmware binary.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod bundle;
pub mod config;
pub mod error;
pub mod fsm;
pub mod network;
pub mod retry;

pub use app::events::{OnboardingEvent, OnboardingResult};
pub use app::service::{OnboardingController, OnboardingReport};
pub use app::types::{ConnectivityAdapter, NetworkIdentity, TargetNetwork};
pub use error::{Error, Result};
