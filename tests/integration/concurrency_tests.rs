//! One attempt at a time: overlapping calls are rejected, not queued.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use super::mock_radio::{MockRadio, controller, home_net, run_recorded};

use enrollee::retry::CancelToken;
use enrollee::{ConnectivityAdapter, Error, OnboardingEvent, OnboardingResult};

#[test]
fn overlapping_attempt_is_busy() {
    let (started_tx, started_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let radio = MockRadio::wifi()
        .target_after(0, "HomeNet")
        .on_scan(move |n| {
            if n == 1 {
                started_tx.send(()).unwrap();
                release_rx.recv().unwrap();
            }
        });
    let c = Arc::new(controller(radio));

    let worker = {
        let c = Arc::clone(&c);
        thread::spawn(move || {
            let mut events = Vec::new();
            let result = c.onboard(
                &home_net(),
                ConnectivityAdapter::Wifi,
                &mut |e: OnboardingEvent| events.push(e),
            );
            (result, events)
        })
    };

    // The worker now holds the radio inside its first scan.
    started_rx.recv().unwrap();

    let (report, events) =
        run_recorded(&c, &home_net(), ConnectivityAdapter::Wifi, &CancelToken::new());
    assert_eq!(report.result, OnboardingResult::Error);
    assert_eq!(report.failure, Some(Error::Busy));
    assert!(events.is_empty());
    assert_eq!(c.current_identity(ConnectivityAdapter::Wifi), Err(Error::Busy));

    release_tx.send(()).unwrap();
    let (result, events) = worker.join().unwrap();
    assert_eq!(result, OnboardingResult::NetworkConnected);
    assert_eq!(
        events,
        vec![OnboardingEvent::NetworkFound, OnboardingEvent::NetworkConnected]
    );
}

#[test]
fn cancel_from_another_thread_stops_scanning() {
    let (scanning_tx, scanning_rx) = mpsc::sync_channel::<()>(1);
    let radio = MockRadio::wifi().on_scan(move |n| {
        if n == 2 {
            let _ = scanning_tx.try_send(());
        }
    });
    let c = Arc::new(controller(radio));
    let cancel = CancelToken::new();

    let worker = {
        let c = Arc::clone(&c);
        let cancel = cancel.clone();
        thread::spawn(move || run_recorded(&c, &home_net(), ConnectivityAdapter::Wifi, &cancel))
    };

    scanning_rx.recv().unwrap();
    cancel.cancel();

    let (report, events) = worker.join().unwrap();
    assert_eq!(report.result, OnboardingResult::Error);
    assert_eq!(report.failure, Some(Error::Cancelled));
    assert!(report.scan_attempts >= 2);
    assert!(events.is_empty());
}
