//! Provisioning status board.
//!
//! Implements [`StatusReporter`] by keeping the latest onboarding outcome
//! as two resource snapshots that the provisioning layer serves to remote
//! clients:
//!
//! | Path        | Attributes                                       |
//! |-------------|--------------------------------------------------|
//! | `/oic/prov` | `ps` status, `tnn` target name, `tnt` adapter, `res` result code |
//! | `/oic/net`  | `ant` supported adapters, `tnn`, `ip` or `mac`   |
//!
//! The request/response layer that actually answers GETs is outside this
//! crate; it calls [`StatusBoard::resource`] for the JSON body.

use log::info;
use serde::Serialize;

use crate::app::events::OnboardingResult;
use crate::app::ports::StatusReporter;
use crate::app::types::{ConnectivityAdapter, LocalAddress, NetworkIdentity};

pub const PROV_URI: &str = "/oic/prov";
pub const NET_URI: &str = "/oic/net";

/// `ps` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProvStatus {
    Provisioned = 0,
    NotProvisioned = 1,
}

#[derive(Debug, Clone, Serialize)]
struct ProvResource {
    ps: u8,
    tnn: String,
    tnt: u32,
    res: i8,
}

#[derive(Debug, Clone, Serialize)]
struct NetResource {
    ant: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tnn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mac: Option<String>,
}

pub struct StatusBoard {
    supported: Vec<ConnectivityAdapter>,
    prov: Option<ProvResource>,
    identity: Option<NetworkIdentity>,
}

impl StatusBoard {
    /// Board for an enrollee that can onboard over `supported` adapters.
    pub fn new(supported: &[ConnectivityAdapter]) -> Self {
        Self {
            supported: supported.to_vec(),
            prov: None,
            identity: None,
        }
    }

    pub fn prov_status(&self) -> ProvStatus {
        match &self.prov {
            Some(p) if p.ps == ProvStatus::Provisioned as u8 => ProvStatus::Provisioned,
            _ => ProvStatus::NotProvisioned,
        }
    }

    pub fn identity(&self) -> Option<&NetworkIdentity> {
        self.identity.as_ref()
    }

    /// JSON body for `path`, or `None` for an unknown path or a snapshot
    /// that has not been reported yet.
    pub fn resource(&self, path: &str) -> Option<String> {
        match path {
            PROV_URI => self
                .prov
                .as_ref()
                .and_then(|p| serde_json::to_string(p).ok()),
            NET_URI => serde_json::to_string(&self.net_resource()).ok(),
            _ => None,
        }
    }

    fn net_resource(&self) -> NetResource {
        let mut net = NetResource {
            ant: self.supported.iter().map(|a| a.code()).collect(),
            tnn: None,
            ip: None,
            mac: None,
        };
        if let Some(id) = &self.identity {
            net.tnn = id.network_name().map(str::to_owned);
            match id.address() {
                LocalAddress::Ipv4(ip) => net.ip = Some(ip.to_string()),
                mac @ LocalAddress::Mac(_) => net.mac = Some(mac.to_string()),
            }
        }
        net
    }
}

impl StatusReporter for StatusBoard {
    fn report_result(
        &mut self,
        target_name: &str,
        adapter: ConnectivityAdapter,
        result: OnboardingResult,
    ) {
        let ps = if result.is_connected() {
            ProvStatus::Provisioned
        } else {
            ProvStatus::NotProvisioned
        };
        if ps == ProvStatus::NotProvisioned {
            self.identity = None;
        }
        info!("STATUS | {} '{}' -> {} ({:?})", adapter, target_name, result, ps);
        self.prov = Some(ProvResource {
            ps: ps as u8,
            tnn: target_name.to_owned(),
            tnt: adapter.code(),
            res: result.code(),
        });
    }

    fn report_identity(&mut self, identity: &NetworkIdentity) {
        info!("STATUS | identity {:?}", identity);
        self.identity = Some(identity.clone());
    }
}
