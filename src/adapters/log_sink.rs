//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing onboarding events to the logger
//! (UART / USB-CDC on device).  Used by the firmware binary when no
//! remote provisioning client is attached.

use log::{info, warn};

use crate::app::events::OnboardingEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`OnboardingEvent`] and counts them.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: OnboardingEvent) {
        self.emitted += 1;
        match event {
            OnboardingEvent::NetworkFound => {
                info!("EVENT | network found (code={})", event.code());
            }
            OnboardingEvent::NetworkConnected => {
                info!("EVENT | network connected (code={})", event.code());
            }
            OnboardingEvent::NetworkNotConnected => {
                warn!("EVENT | network not connected (code={})", event.code());
            }
        }
    }
}
