//! Application core: ports, domain types, and the onboarding controller.
//!
//! ```text
//!   RadioDriver ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │   OnboardingController    │
//!         Clock ──▶ │ Scanner · Negotiator · Q  │ ──▶ StatusReporter
//!                   └──────────────────────────┘
//! ```

pub mod events;
pub mod ports;
pub mod service;
pub mod types;
