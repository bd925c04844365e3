//! Domain value types shared by the scanner, negotiator, info query and
//! controller.

use core::fmt;
use core::net::Ipv4Addr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Longest network name the enrollee will report (IEEE 802.11 SSID limit).
pub const MAX_NETWORK_NAME_LEN: usize = 32;

/// Fixed-capacity network name.  Construction fails instead of truncating.
pub type NetworkName = heapless::String<MAX_NETWORK_NAME_LEN>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Copy `name` into a [`NetworkName`], failing with
/// [`Error::NameTooLong`] if it does not fit.
pub fn network_name(name: &str) -> Result<NetworkName> {
    let mut out = NetworkName::new();
    out.push_str(name).map_err(|()| Error::NameTooLong)?;
    Ok(out)
}

// ───────────────────────────────────────────────────────────────
// Adapter
// ───────────────────────────────────────────────────────────────

/// Connectivity transport a radio driver serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ConnectivityAdapter {
    /// IP over WiFi.
    Wifi,
    /// Bluetooth LE GATT.
    BleGatt,
    /// Bluetooth classic (RFCOMM over BR/EDR).
    BtEdr,
}

impl ConnectivityAdapter {
    /// Adapter bit used on the provisioning wire.
    pub const fn code(self) -> u32 {
        match self {
            Self::Wifi => 1 << 16,
            Self::BleGatt => 1 << 17,
            Self::BtEdr => 1 << 18,
        }
    }
}

impl fmt::Display for ConnectivityAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wifi => write!(f, "WiFi"),
            Self::BleGatt => write!(f, "BLE"),
            Self::BtEdr => write!(f, "BT"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Target network
// ───────────────────────────────────────────────────────────────

/// The network to join.  The secret is opaque: it is never validated,
/// logged, or serialized.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct TargetNetwork {
    name: NetworkName,
    secret: heapless::String<64>,
}

#[derive(Deserialize)]
struct RawTarget {
    name: String,
    #[serde(default)]
    secret: String,
}

impl TryFrom<RawTarget> for TargetNetwork {
    type Error = Error;

    fn try_from(raw: RawTarget) -> Result<Self> {
        Self::new(&raw.name, &raw.secret)
    }
}

impl TargetNetwork {
    /// Name must be 1..=32 bytes; an empty secret means an open network.
    pub fn new(name: &str, secret: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::Config("target name empty"));
        }
        let name = network_name(name)?;
        let mut s = heapless::String::new();
        s.push_str(secret)
            .map_err(|()| Error::Config("target secret longer than 64 bytes"))?;
        Ok(Self { name, secret: s })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn network_name(&self) -> &NetworkName {
        &self.name
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for TargetNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetNetwork")
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

// ───────────────────────────────────────────────────────────────
// Scan results
// ───────────────────────────────────────────────────────────────

/// Encryption class a scan reports for a visible network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionClass {
    None,
    Wep,
    /// WPA / TKIP.
    Wpa,
    /// WPA2 / CCMP.
    Wpa2,
    Auto,
    Unknown,
}

impl fmt::Display for EncryptionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "None",
            Self::Wep => "WEP",
            Self::Wpa => "WPA",
            Self::Wpa2 => "WPA2",
            Self::Auto => "Auto",
            Self::Unknown => "?",
        };
        f.write_str(s)
    }
}

/// One network seen by a scan.  Names come straight from the driver and
/// are not length-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub name: String,
    pub encryption: EncryptionClass,
}

impl ScanEntry {
    pub fn new(name: &str, encryption: EncryptionClass) -> Self {
        Self {
            name: name.to_owned(),
            encryption,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Link state and identity
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Disconnected,
    Associated,
}

/// Address a driver reports for its own interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalAddress {
    Ipv4(Ipv4Addr),
    Mac(MacAddress),
}

impl fmt::Display for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4(ip) => write!(f, "{ip}"),
            Self::Mac(m) => write!(
                f,
                "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
                m[0], m[1], m[2], m[3], m[4], m[5]
            ),
        }
    }
}

/// Locally observed identity after a successful association.  Each
/// variant carries only what its adapter can observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkIdentity {
    Wifi {
        address: Ipv4Addr,
        network_name: NetworkName,
    },
    BleGatt {
        address: MacAddress,
    },
    BtEdr {
        address: MacAddress,
    },
}

impl NetworkIdentity {
    pub fn adapter(&self) -> ConnectivityAdapter {
        match self {
            Self::Wifi { .. } => ConnectivityAdapter::Wifi,
            Self::BleGatt { .. } => ConnectivityAdapter::BleGatt,
            Self::BtEdr { .. } => ConnectivityAdapter::BtEdr,
        }
    }

    pub fn address(&self) -> LocalAddress {
        match self {
            Self::Wifi { address, .. } => LocalAddress::Ipv4(*address),
            Self::BleGatt { address } | Self::BtEdr { address } => LocalAddress::Mac(*address),
        }
    }

    /// Joined network name; only WiFi has one.
    pub fn network_name(&self) -> Option<&str> {
        match self {
            Self::Wifi { network_name, .. } => Some(network_name.as_str()),
            _ => None,
        }
    }
}
