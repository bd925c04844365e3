//! One-shot visibility check for the target network.

use log::{debug, info, warn};

use crate::app::ports::RadioDriver;
use crate::app::types::{ConnectivityAdapter, TargetNetwork};

/// Reports whether the target network is visible right now.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkScanner;

impl NetworkScanner {
    pub fn new() -> Self {
        Self
    }

    /// Run one scan on `radio` and look for an exact, case-sensitive
    /// match of `target.name()`.
    ///
    /// A failed enumeration counts as "not found yet" and yields `false`.
    pub fn scan_for(
        &self,
        radio: &mut impl RadioDriver,
        target: &TargetNetwork,
        adapter: ConnectivityAdapter,
    ) -> bool {
        if radio.adapter() != adapter {
            warn!("Scan: radio serves {}, asked for {}", radio.adapter(), adapter);
            return false;
        }

        let networks = match radio.scan() {
            Ok(list) => list,
            Err(e) => {
                warn!("Scan: no result from driver ({})", e);
                return false;
            }
        };

        info!("Scan: {} network(s) visible", networks.len());
        for (i, net) in networks.iter().enumerate() {
            debug!("Scan: {}) '{}' encryption={}", i, net.name, net.encryption);
        }

        networks.iter().any(|net| net.name == target.name())
    }
}
