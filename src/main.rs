//! Enrollee Firmware: Main Entry Point
//!
//! Brings up the WiFi station, runs one onboarding attempt against the
//! target baked in at build time, and publishes the outcome to the
//! provisioning status board.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  WifiAdapter    SystemClock    LogEventSink    StatusBoard  │
//! │  (RadioDriver)  (Clock)        (EventSink)     (Reporter)   │
//! │  ─────────────── Port Trait Boundary ───────────────────    │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │     OnboardingController (pure logic)                │  │
//! │  │     Scanner · Negotiator · InfoQuery                 │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;

use enrollee::adapters::log_sink::LogEventSink;
use enrollee::adapters::status_board::{NET_URI, PROV_URI, StatusBoard};
use enrollee::adapters::time::SystemClock;
use enrollee::adapters::wifi::WifiAdapter;
use enrollee::bundle::ConfigurationSource;
use enrollee::config::OnboardingConfig;
use enrollee::retry::CancelToken;
use enrollee::{ConnectivityAdapter, OnboardingController, TargetNetwork};

const ENROLLEE_BUNDLE_ID: &str = "oic.bundle.enrollee";

fn load_config() -> OnboardingConfig {
    let Some(doc) = option_env!("ENROLLEE_BUNDLES") else {
        return OnboardingConfig::default();
    };
    let source = match ConfigurationSource::from_json(doc) {
        Ok(s) => s,
        Err(e) => {
            warn!("Bundle config unreadable ({}), using defaults", e);
            return OnboardingConfig::default();
        }
    };
    let props = source
        .configured_bundles()
        .into_iter()
        .find(|b| b.get("id").is_some_and(|id| id == ENROLLEE_BUNDLE_ID));
    match props.map(|p| OnboardingConfig::from_properties(&p)) {
        Some(Ok(cfg)) => cfg,
        Some(Err(e)) => {
            warn!("Enrollee bundle rejected ({}), using defaults", e);
            OnboardingConfig::default()
        }
        None => OnboardingConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Enrollee v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Radio bring-up ─────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let wifi = EspWifi::new(peripherals.modem, sysloop, Some(nvs))?;

    // ── 3. Onboarding ─────────────────────────────────────────
    let target = TargetNetwork::new(
        option_env!("ENROLLEE_SSID").unwrap_or("EasySetup"),
        option_env!("ENROLLEE_PASS").unwrap_or(""),
    )
    .map_err(|e| anyhow::anyhow!("target network: {e}"))?;

    let controller =
        OnboardingController::new(WifiAdapter::new(wifi), SystemClock::new(), load_config())
            .map_err(|e| anyhow::anyhow!("controller: {e}"))?;

    let mut sink = LogEventSink::new();
    let report = controller.run(&target, ConnectivityAdapter::Wifi, &mut sink, &CancelToken::new());

    // ── 4. Status publication ─────────────────────────────────
    let mut board = StatusBoard::new(&[ConnectivityAdapter::Wifi]);
    report.publish(&mut board);

    match report.failure {
        None => info!("Onboarding finished: {}", report.result),
        Some(e) => error!("Onboarding finished: {} ({})", report.result, e),
    }
    info!("{} {}", PROV_URI, board.resource(PROV_URI).context("prov resource")?);
    info!("{} {}", NET_URI, board.resource(NET_URI).context("net resource")?);

    // The provisioning layer owns the device from here.
    loop {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(1_000);
    }
}
