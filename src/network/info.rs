//! Post-association network identity query.

use crate::app::ports::RadioDriver;
use crate::app::types::{
    ConnectivityAdapter, LinkStatus, LocalAddress, NetworkIdentity, network_name,
};
use crate::error::{Error, Result};

/// Identity query bound to one adapter class.
#[derive(Debug, Clone, Copy)]
pub struct NetworkInfoQuery {
    adapter: ConnectivityAdapter,
}

impl NetworkInfoQuery {
    pub fn new(adapter: ConnectivityAdapter) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> ConnectivityAdapter {
        self.adapter
    }

    /// Read the identity `radio` currently observes.
    ///
    /// Fails with [`Error::NotConnected`] unless `adapter` matches the
    /// query's own class, the radio serves that class, and the radio
    /// reports [`LinkStatus::Associated`].  A WiFi network name longer than
    /// [`MAX_NETWORK_NAME_LEN`](crate::app::types::MAX_NETWORK_NAME_LEN)
    /// fails with [`Error::NameTooLong`].
    pub fn current_identity(
        &self,
        radio: &impl RadioDriver,
        adapter: ConnectivityAdapter,
    ) -> Result<NetworkIdentity> {
        if adapter != self.adapter || radio.adapter() != self.adapter {
            return Err(Error::NotConnected);
        }
        if radio.status() != LinkStatus::Associated {
            return Err(Error::NotConnected);
        }

        match (self.adapter, radio.local_address()) {
            (ConnectivityAdapter::Wifi, Some(LocalAddress::Ipv4(address))) => {
                let joined = radio.joined_network().ok_or(Error::NotConnected)?;
                Ok(NetworkIdentity::Wifi {
                    address,
                    network_name: network_name(&joined)?,
                })
            }
            (ConnectivityAdapter::BleGatt, Some(LocalAddress::Mac(address))) => {
                Ok(NetworkIdentity::BleGatt { address })
            }
            (ConnectivityAdapter::BtEdr, Some(LocalAddress::Mac(address))) => {
                Ok(NetworkIdentity::BtEdr { address })
            }
            _ => Err(Error::NotConnected),
        }
    }
}
