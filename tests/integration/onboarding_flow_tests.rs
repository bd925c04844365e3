//! End-to-end onboarding attempts against the scripted radio.
//!
//! Covers the scan → found → connect → identity pipeline, every terminal
//! path, and the event sequence each path emits.

use super::mock_radio::{FakeClock, HOME_ADDRESS, MockRadio, RadioCall, controller, controller_with, home_net, run_recorded};

use enrollee::adapters::status_board::{NET_URI, PROV_URI, ProvStatus, StatusBoard};
use enrollee::app::ports::Clock;
use enrollee::app::types::{LinkStatus, network_name};
use enrollee::config::OnboardingConfig;
use enrollee::fsm::{OnboardingState, Outcome};
use enrollee::retry::CancelToken;
use enrollee::{ConnectivityAdapter, Error, NetworkIdentity, OnboardingEvent, OnboardingResult};

const WIFI: ConnectivityAdapter = ConnectivityAdapter::Wifi;

fn home_identity() -> NetworkIdentity {
    NetworkIdentity::Wifi {
        address: HOME_ADDRESS,
        network_name: network_name("HomeNet").unwrap(),
    }
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn home_net_found_on_third_scan_then_connected() {
    let c = controller(MockRadio::wifi().target_after(2, "HomeNet"));
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::NetworkConnected);
    assert_eq!(
        events,
        vec![OnboardingEvent::NetworkFound, OnboardingEvent::NetworkConnected]
    );
    assert_eq!(report.scan_attempts, 3);
    assert_eq!(report.failure, None);
    assert_eq!(report.identity, Some(home_identity()));
    assert_eq!(report.association.map(|a| a.attempts), Some(1));

    // Two scan intervals plus one settle window.
    assert_eq!(c.clock().now_ms(), 2 * 1_000 + 10_000);
}

#[test]
fn trace_walks_every_state_once() {
    let c = controller(MockRadio::wifi().target_after(0, "HomeNet"));
    let (report, _) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(
        report.trace(),
        &[
            OnboardingState::Idle,
            OnboardingState::Scanning,
            OnboardingState::Found,
            OnboardingState::Connecting,
            OnboardingState::Done(Outcome::Success),
        ]
    );
}

#[test]
fn onboard_returns_only_the_terminal_result() {
    let c = controller(MockRadio::wifi().target_after(1, "HomeNet"));
    let mut events = Vec::new();
    let result = c.onboard(&home_net(), WIFI, &mut |e: OnboardingEvent| events.push(e));

    assert_eq!(result, OnboardingResult::NetworkConnected);
    assert_eq!(events.len(), 2);
}

#[test]
fn failed_enumerations_count_as_misses() {
    let c = controller(MockRadio::wifi().failed_scans(2).target_after(0, "HomeNet"));
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::NetworkConnected);
    assert_eq!(report.scan_attempts, 3);
    assert_eq!(events[0], OnboardingEvent::NetworkFound);
}

#[test]
fn existing_association_dropped_before_connecting() {
    let radio = MockRadio::wifi()
        .target_after(0, "HomeNet")
        .already_joined("Neighbour");
    let c = controller(radio);
    let (report, _) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());
    assert_eq!(report.result, OnboardingResult::NetworkConnected);

    let radio = c.into_radio();
    assert_eq!(
        radio.calls,
        vec![
            RadioCall::Scan,
            RadioCall::Disconnect,
            RadioCall::Associate {
                name: "HomeNet".into()
            },
        ]
    );
    assert_eq!(radio.joined.as_deref(), Some("HomeNet"));
}

#[test]
fn association_on_later_request_still_connects() {
    let c = controller(
        MockRadio::wifi()
            .target_after(0, "HomeNet")
            .associate_on(Some(4)),
    );
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::NetworkConnected);
    assert_eq!(report.association.map(|a| a.attempts), Some(4));
    assert_eq!(events.last(), Some(&OnboardingEvent::NetworkConnected));
    assert_eq!(c.clock().now_ms(), 40_000);
}

#[test]
fn second_attempt_starts_again_from_idle() {
    let c = controller(MockRadio::wifi().target_after(0, "HomeNet"));
    let (first, _) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());
    let (second, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(first.result, OnboardingResult::NetworkConnected);
    assert_eq!(second.result, OnboardingResult::NetworkConnected);
    assert_eq!(second.trace()[0], OnboardingState::Idle);
    assert_eq!(
        events,
        vec![OnboardingEvent::NetworkFound, OnboardingEvent::NetworkConnected]
    );
}

// ── Failure paths ─────────────────────────────────────────────

#[test]
fn absent_radio_fails_without_events() {
    let c = controller(MockRadio::wifi().absent());
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::Error);
    assert_eq!(report.failure, Some(Error::AdapterUnavailable));
    assert!(events.is_empty());
    assert_eq!(report.scan_attempts, 0);
    assert!(c.with_radio(|r| r.calls.is_empty()).unwrap());
}

#[test]
fn adapter_mismatch_is_unavailable() {
    let c = controller(MockRadio::wifi().target_after(0, "HomeNet"));
    let (report, events) =
        run_recorded(&c, &home_net(), ConnectivityAdapter::BleGatt, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::Error);
    assert_eq!(report.failure, Some(Error::AdapterUnavailable));
    assert!(events.is_empty());
}

#[test]
fn exhausted_connect_budget_reports_not_connected() {
    let c = controller(
        MockRadio::wifi()
            .target_after(0, "HomeNet")
            .associate_on(None),
    );
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::NetworkNotConnected);
    assert_eq!(report.failure, Some(Error::Timeout));
    assert_eq!(
        events,
        vec![
            OnboardingEvent::NetworkFound,
            OnboardingEvent::NetworkNotConnected
        ]
    );
    assert!(report.identity.is_none());
    assert_eq!(
        report.trace().last(),
        Some(&OnboardingState::Done(Outcome::Failure))
    );

    let radio = c.into_radio();
    assert_eq!(radio.association_requests().len(), 6);
    assert_eq!(radio.calls.last(), Some(&RadioCall::Disconnect));
}

#[test]
fn configured_attempt_budget_is_honoured() {
    let config = OnboardingConfig {
        max_connect_attempts: 2,
        connect_settle_ms: 500,
        ..OnboardingConfig::default()
    };
    let c = controller_with(
        MockRadio::wifi()
            .target_after(0, "HomeNet")
            .associate_on(None),
        config,
    );
    let (report, _) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::NetworkNotConnected);
    assert_eq!(c.clock().now_ms(), 1_000);
    assert_eq!(c.with_radio(|r| r.requests).unwrap(), 2);
}

#[test]
fn cancel_while_scanning_ends_without_events() {
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    let radio = MockRadio::wifi().on_scan(move |n| {
        if n == 3 {
            trigger.cancel();
        }
    });
    let c = controller(radio);
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &cancel);

    assert_eq!(report.result, OnboardingResult::Error);
    assert_eq!(report.failure, Some(Error::Cancelled));
    assert_eq!(report.scan_attempts, 3);
    assert!(events.is_empty());
}

#[test]
fn cancel_while_connecting_reports_not_connected() {
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    // Associates on the first request, but the settle window is cancelled.
    let radio = MockRadio::wifi()
        .target_after(0, "HomeNet")
        .on_scan(move |_| trigger.cancel());
    let c = controller(radio);
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &cancel);

    assert_eq!(report.result, OnboardingResult::NetworkNotConnected);
    assert_eq!(report.failure, Some(Error::Cancelled));
    assert_eq!(
        events,
        vec![
            OnboardingEvent::NetworkFound,
            OnboardingEvent::NetworkNotConnected
        ]
    );

    let radio = c.into_radio();
    assert_eq!(radio.requests, 1);
    assert_eq!(radio.link, LinkStatus::Disconnected);
    assert_eq!(radio.calls.last(), Some(&RadioCall::Disconnect));
}

#[test]
fn scan_deadline_times_out_without_events() {
    let config = OnboardingConfig {
        scan_timeout_ms: Some(5_000),
        ..OnboardingConfig::default()
    };
    let c = controller_with(MockRadio::wifi(), config);
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::Error);
    assert_eq!(report.failure, Some(Error::Timeout));
    assert_eq!(report.scan_attempts, 5);
    assert!(events.is_empty());
    assert_eq!(c.clock().now_ms(), 5_000);
}

#[test]
fn overlong_joined_name_still_connects_without_identity() {
    let long = "N".repeat(33);
    let c = controller(
        MockRadio::wifi()
            .target_after(0, "HomeNet")
            .joined_as(&long),
    );
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::NetworkConnected);
    assert_eq!(report.failure, None);
    assert!(report.identity.is_none());
    assert_eq!(events.last(), Some(&OnboardingEvent::NetworkConnected));
}

#[test]
fn association_without_address_still_connects() {
    let c = controller(
        MockRadio::wifi()
            .target_after(0, "HomeNet")
            .without_address(),
    );
    let (report, events) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::NetworkConnected);
    assert_eq!(report.failure, None);
    assert!(report.identity.is_none());
    assert_eq!(
        report.association.map(|a| (a.attempts, a.local_address)),
        Some((1, None))
    );
    assert_eq!(
        events,
        vec![OnboardingEvent::NetworkFound, OnboardingEvent::NetworkConnected]
    );

    let radio = c.into_radio();
    assert_eq!(radio.link, LinkStatus::Associated);
    assert!(!radio.calls.contains(&RadioCall::Disconnect));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = OnboardingConfig {
        max_connect_attempts: 0,
        ..OnboardingConfig::default()
    };
    let res = enrollee::OnboardingController::new(MockRadio::wifi(), FakeClock::default(), config);
    assert!(matches!(res, Err(Error::Config(_))));
}

// ── Status publication ────────────────────────────────────────

#[test]
fn connected_report_publishes_provisioned_status() {
    let c = controller(MockRadio::wifi().target_after(0, "HomeNet"));
    let (report, _) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    let mut board = StatusBoard::new(&[WIFI]);
    report.publish(&mut board);

    assert_eq!(board.prov_status(), ProvStatus::Provisioned);
    assert_eq!(
        board.resource(PROV_URI).unwrap(),
        r#"{"ps":0,"tnn":"HomeNet","tnt":65536,"res":2}"#
    );
    assert_eq!(
        board.resource(NET_URI).unwrap(),
        r#"{"ant":[65536],"tnn":"HomeNet","ip":"192.168.1.42"}"#
    );
}

#[test]
fn failed_report_publishes_not_provisioned() {
    let c = controller(
        MockRadio::wifi()
            .target_after(0, "HomeNet")
            .associate_on(None),
    );
    let (report, _) = run_recorded(&c, &home_net(), WIFI, &CancelToken::new());

    let mut board = StatusBoard::new(&[WIFI]);
    report.publish(&mut board);

    assert_eq!(board.prov_status(), ProvStatus::NotProvisioned);
    assert!(board.identity().is_none());
    assert!(board.resource(PROV_URI).unwrap().contains(r#""res":3"#));
}
