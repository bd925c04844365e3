//! WiFi station-mode radio driver.
//!
//! Implements [`RadioDriver`], the hexagonal boundary for the radio the
//! onboarding controller scans and associates with.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: a deterministic simulation for host-side tests
//!   and demos.  Networks are declared up front; an association succeeds
//!   when the requested network is visible and the secret matches.

use log::{info, warn};

use crate::app::ports::{DriverError, RadioDriver};
use crate::app::types::{ConnectivityAdapter, EncryptionClass, LinkStatus, LocalAddress, ScanEntry};

#[cfg(not(target_os = "espidf"))]
use core::net::Ipv4Addr;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// Simulation model
// ───────────────────────────────────────────────────────────────

/// A network the simulated radio can see.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone)]
pub struct SimNetwork {
    pub name: String,
    pub secret: String,
    pub encryption: EncryptionClass,
}

/// Address the simulated DHCP server hands out.
#[cfg(not(target_os = "espidf"))]
pub const SIM_LOCAL_ADDRESS: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 100);

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    #[cfg(target_os = "espidf")]
    wifi: EspWifi<'static>,

    #[cfg(not(target_os = "espidf"))]
    present: bool,
    #[cfg(not(target_os = "espidf"))]
    networks: Vec<SimNetwork>,
    /// Simulation: scans that come back empty before networks appear.
    #[cfg(not(target_os = "espidf"))]
    hidden_scans: u32,
    #[cfg(not(target_os = "espidf"))]
    joined: Option<String>,

    scan_count: u32,
}

#[cfg(target_os = "espidf")]
impl WifiAdapter {
    /// Wrap an already constructed ESP-IDF WiFi driver.
    pub fn new(wifi: EspWifi<'static>) -> Self {
        Self {
            wifi,
            scan_count: 0,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    /// Simulated radio with no networks in range.
    pub fn simulated() -> Self {
        Self {
            present: true,
            networks: Vec::new(),
            hidden_scans: 0,
            joined: None,
            scan_count: 0,
        }
    }

    /// Simulated radio whose hardware is missing.
    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::simulated()
        }
    }

    #[must_use]
    pub fn with_network(mut self, name: &str, secret: &str, encryption: EncryptionClass) -> Self {
        self.networks.push(SimNetwork {
            name: name.to_owned(),
            secret: secret.to_owned(),
            encryption,
        });
        self
    }

    /// The first `n` scans see nothing, as if the AP were still booting.
    #[must_use]
    pub fn with_hidden_scans(mut self, n: u32) -> Self {
        self.hidden_scans = n;
        self
    }
}

impl WifiAdapter {
    /// Scans issued since construction.
    pub fn scan_count(&self) -> u32 {
        self.scan_count
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_is_present(&mut self) -> bool {
        match self.wifi.is_started() {
            Ok(true) => true,
            _ => match self.wifi.start() {
                Ok(()) => true,
                Err(e) => {
                    warn!("WiFi: driver start failed ({})", e);
                    false
                }
            },
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_present(&mut self) -> bool {
        self.present
    }

    #[cfg(target_os = "espidf")]
    fn platform_scan(&mut self) -> Result<Vec<ScanEntry>, DriverError> {
        let aps = self.wifi.scan().map_err(|e| {
            warn!("WiFi: scan failed ({})", e);
            DriverError::ScanFailed
        })?;
        Ok(aps
            .iter()
            .map(|ap| ScanEntry::new(ap.ssid.as_str(), encryption_of(ap.auth_method)))
            .collect())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_scan(&mut self) -> Result<Vec<ScanEntry>, DriverError> {
        if !self.present {
            return Err(DriverError::NotPresent);
        }
        if self.scan_count <= self.hidden_scans {
            return Ok(Vec::new());
        }
        Ok(self
            .networks
            .iter()
            .map(|n| ScanEntry::new(&n.name, n.encryption))
            .collect())
    }

    #[cfg(target_os = "espidf")]
    fn platform_associate(&mut self, name: &str, secret: &str) -> Result<(), DriverError> {
        let conf = Configuration::Client(ClientConfiguration {
            ssid: name.try_into().map_err(|_| DriverError::Rejected)?,
            password: secret.try_into().map_err(|_| DriverError::Rejected)?,
            auth_method: if secret.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        });
        self.wifi
            .set_configuration(&conf)
            .map_err(|_| DriverError::IoError)?;
        self.wifi.connect().map_err(|_| DriverError::Rejected)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_associate(&mut self, name: &str, secret: &str) -> Result<(), DriverError> {
        if !self.present {
            return Err(DriverError::NotPresent);
        }
        let visible = self.scan_count > self.hidden_scans;
        match self.networks.iter().find(|n| n.name == name) {
            Some(n) if visible && n.secret == secret => {
                self.joined = Some(n.name.clone());
            }
            Some(_) if visible => {
                warn!("WiFi(sim): auth failure for '{}'", name);
                self.joined = None;
            }
            _ => {
                self.joined = None;
            }
        }
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_status(&self) -> LinkStatus {
        if self.wifi.is_connected().unwrap_or(false) {
            LinkStatus::Associated
        } else {
            LinkStatus::Disconnected
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_status(&self) -> LinkStatus {
        if self.joined.is_some() {
            LinkStatus::Associated
        } else {
            LinkStatus::Disconnected
        }
    }

    #[cfg(target_os = "espidf")]
    fn platform_local_address(&self) -> Option<LocalAddress> {
        let info = self.wifi.sta_netif().get_ip_info().ok()?;
        if info.ip.is_unspecified() {
            return None;
        }
        Some(LocalAddress::Ipv4(info.ip))
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_local_address(&self) -> Option<LocalAddress> {
        self.joined
            .as_ref()
            .map(|_| LocalAddress::Ipv4(SIM_LOCAL_ADDRESS))
    }

    #[cfg(target_os = "espidf")]
    fn platform_joined_network(&self) -> Option<String> {
        if !self.wifi.is_connected().unwrap_or(false) {
            return None;
        }
        match self.wifi.get_configuration() {
            Ok(Configuration::Client(c)) => Some(c.ssid.as_str().to_owned()),
            _ => None,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_joined_network(&self) -> Option<String> {
        self.joined.clone()
    }

    #[cfg(target_os = "espidf")]
    fn platform_disconnect(&mut self) {
        if let Err(e) = self.wifi.disconnect() {
            warn!("WiFi: disconnect failed ({})", e);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_disconnect(&mut self) {
        self.joined = None;
    }
}

#[cfg(target_os = "espidf")]
fn encryption_of(auth: Option<AuthMethod>) -> EncryptionClass {
    match auth {
        Some(AuthMethod::None) => EncryptionClass::None,
        Some(AuthMethod::WEP) => EncryptionClass::Wep,
        Some(AuthMethod::WPA) => EncryptionClass::Wpa,
        Some(AuthMethod::WPA2Personal | AuthMethod::WPA2Enterprise) => EncryptionClass::Wpa2,
        Some(AuthMethod::WPAWPA2Personal | AuthMethod::WPA2WPA3Personal) => EncryptionClass::Auto,
        _ => EncryptionClass::Unknown,
    }
}

// ───────────────────────────────────────────────────────────────
// RadioDriver
// ───────────────────────────────────────────────────────────────

impl RadioDriver for WifiAdapter {
    fn adapter(&self) -> ConnectivityAdapter {
        ConnectivityAdapter::Wifi
    }

    fn is_present(&mut self) -> bool {
        self.platform_is_present()
    }

    fn scan(&mut self) -> Result<Vec<ScanEntry>, DriverError> {
        self.scan_count = self.scan_count.wrapping_add(1);
        self.platform_scan()
    }

    fn request_association(&mut self, name: &str, secret: &str) -> Result<(), DriverError> {
        info!("WiFi: associating with '{}'", name);
        self.platform_associate(name, secret)
    }

    fn status(&self) -> LinkStatus {
        self.platform_status()
    }

    fn local_address(&self) -> Option<LocalAddress> {
        self.platform_local_address()
    }

    fn joined_network(&self) -> Option<String> {
        self.platform_joined_network()
    }

    fn disconnect(&mut self) {
        self.platform_disconnect();
        info!("WiFi: disconnected");
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
