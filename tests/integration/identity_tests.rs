//! Current-identity queries across adapters.

use super::mock_radio::{BLE_MAC, HOME_ADDRESS, MockRadio, controller, home_net, run_recorded};

use enrollee::app::types::{LinkStatus, MAX_NETWORK_NAME_LEN, network_name};
use enrollee::network::info::NetworkInfoQuery;
use enrollee::retry::CancelToken;
use enrollee::{ConnectivityAdapter, Error, NetworkIdentity, OnboardingEvent, OnboardingResult};

const ALL_ADAPTERS: [ConnectivityAdapter; 3] = [
    ConnectivityAdapter::Wifi,
    ConnectivityAdapter::BleGatt,
    ConnectivityAdapter::BtEdr,
];

#[test]
fn identity_is_stable_between_queries() {
    let c = controller(MockRadio::wifi().target_after(0, "HomeNet"));
    let _ = run_recorded(&c, &home_net(), ConnectivityAdapter::Wifi, &CancelToken::new());

    let first = c.current_identity(ConnectivityAdapter::Wifi).unwrap();
    let second = c.current_identity(ConnectivityAdapter::Wifi).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        NetworkIdentity::Wifi {
            address: HOME_ADDRESS,
            network_name: network_name("HomeNet").unwrap(),
        }
    );
    assert_eq!(first.network_name(), Some("HomeNet"));
}

#[test]
fn disconnected_radio_has_no_identity_on_any_adapter() {
    for radio in [MockRadio::wifi(), MockRadio::ble(), MockRadio::bt_edr()] {
        let c = controller(radio);
        for adapter in ALL_ADAPTERS {
            assert_eq!(
                c.current_identity(adapter),
                Err(Error::NotConnected),
                "{adapter} should not report an identity"
            );
        }
    }
}

#[test]
fn query_status_follows_association() {
    let c = controller(MockRadio::wifi().target_after(0, "HomeNet"));
    assert_eq!(c.query_status(ConnectivityAdapter::Wifi), OnboardingResult::Error);

    let _ = run_recorded(&c, &home_net(), ConnectivityAdapter::Wifi, &CancelToken::new());
    assert_eq!(c.query_status(ConnectivityAdapter::Wifi), OnboardingResult::Ok);
    assert_eq!(c.query_status(ConnectivityAdapter::BleGatt), OnboardingResult::Error);

    c.with_radio(|r| r.link = LinkStatus::Disconnected).unwrap();
    assert_eq!(c.query_status(ConnectivityAdapter::Wifi), OnboardingResult::Error);
}

#[test]
fn ble_onboarding_reports_mac_identity() {
    let c = controller(MockRadio::ble().target_after(1, "HomeNet"));
    let (report, events) =
        run_recorded(&c, &home_net(), ConnectivityAdapter::BleGatt, &CancelToken::new());

    assert_eq!(report.result, OnboardingResult::NetworkConnected);
    assert_eq!(
        events,
        vec![OnboardingEvent::NetworkFound, OnboardingEvent::NetworkConnected]
    );
    assert_eq!(
        report.identity,
        Some(NetworkIdentity::BleGatt { address: BLE_MAC })
    );
    assert_eq!(
        c.current_identity(ConnectivityAdapter::BleGatt)
            .unwrap()
            .network_name(),
        None
    );
}

#[test]
fn bt_edr_identity_carries_mac() {
    let c = controller(MockRadio::bt_edr().already_joined("peer"));
    assert_eq!(
        c.current_identity(ConnectivityAdapter::BtEdr),
        Ok(NetworkIdentity::BtEdr { address: BLE_MAC })
    );
}

#[test]
fn joined_name_at_limit_is_reported() {
    let name = "a".repeat(MAX_NETWORK_NAME_LEN);
    let radio = MockRadio::wifi().already_joined(&name);
    let id = NetworkInfoQuery::new(ConnectivityAdapter::Wifi)
        .current_identity(&radio, ConnectivityAdapter::Wifi)
        .unwrap();
    assert_eq!(id.network_name(), Some(name.as_str()));
}

#[test]
fn joined_name_over_limit_is_rejected() {
    let name = "a".repeat(MAX_NETWORK_NAME_LEN + 1);
    let c = controller(MockRadio::wifi().already_joined(&name));
    assert_eq!(
        c.current_identity(ConnectivityAdapter::Wifi),
        Err(Error::NameTooLong)
    );
}
