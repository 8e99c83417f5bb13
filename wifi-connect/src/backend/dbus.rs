//! [`NmBackend`] over the system D-Bus.

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use zbus::Connection;
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::Result;
use crate::api::builders::ConnectionProfile;
use crate::api::models::{
    AccessPoint, ConnectionError, ConnectionSettings, DeviceState, DeviceType,
};
use crate::backend::NmBackend;
use crate::dbus::{
    NMAccessPointProxy, NMDeviceProxy, NMProxy, NMSettingsConnectionProxy, NMSettingsProxy,
    NMWirelessProxy,
};
use crate::types::constants::{paths, section};
use crate::util::utils::decode_ssid_or_empty;

/// NetworkManager reached over a zbus [`Connection`].
#[derive(Debug, Clone)]
pub struct DbusBackend {
    conn: Connection,
}

impl DbusBackend {
    /// Connects to the system bus.
    pub async fn system() -> Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self { conn })
    }

    /// Wraps an existing bus connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    async fn device_proxy(&self, device: &OwnedObjectPath) -> Result<NMDeviceProxy<'_>> {
        Ok(NMDeviceProxy::builder(&self.conn)
            .path(device.clone())?
            .build()
            .await?)
    }

    async fn wireless_proxy(&self, device: &OwnedObjectPath) -> Result<NMWirelessProxy<'_>> {
        Ok(NMWirelessProxy::builder(&self.conn)
            .path(device.clone())?
            .build()
            .await?)
    }

    async fn settings_connection_proxy(
        &self,
        connection: &OwnedObjectPath,
    ) -> Result<NMSettingsConnectionProxy<'_>> {
        Ok(NMSettingsConnectionProxy::builder(&self.conn)
            .path(connection.clone())?
            .build()
            .await?)
    }

    async fn read_access_point(&self, path: OwnedObjectPath) -> Result<AccessPoint> {
        let ap = NMAccessPointProxy::builder(&self.conn)
            .path(path.clone())?
            .build()
            .await?;

        let ssid = ap
            .ssid()
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: format!("failed to read SSID of access point {}", path.as_str()),
                source: e,
            })?;

        Ok(AccessPoint {
            ssid: decode_ssid_or_empty(&ssid).into_owned(),
            flags: ap.flags().await?.into(),
            wpa_flags: ap.wpa_flags().await?.into(),
            rsn_flags: ap.rsn_flags().await?.into(),
        })
    }
}

/// Reads a string field out of a `GetSettings` section.
fn str_field(section: &HashMap<String, OwnedValue>, key: &str) -> Option<String> {
    match section.get(key).map(|v| &**v) {
        Some(Value::Str(s)) => Some(s.to_string()),
        _ => None,
    }
}

#[async_trait]
impl NmBackend for DbusBackend {
    async fn list_connections(&self) -> Result<Vec<OwnedObjectPath>> {
        let settings = NMSettingsProxy::new(&self.conn).await?;
        settings
            .list_connections()
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: "failed to list saved connections".to_string(),
                source: e,
            })
    }

    async fn connection_settings(
        &self,
        connection: &OwnedObjectPath,
    ) -> Result<ConnectionSettings> {
        let proxy = self.settings_connection_proxy(connection).await?;
        let all = proxy
            .get_settings()
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: format!("failed to get settings of {}", connection.as_str()),
                source: e,
            })?;

        let conn_section = all.get(section::CONNECTION);
        Ok(ConnectionSettings {
            id: conn_section
                .and_then(|s| str_field(s, "id"))
                .unwrap_or_default(),
            connection_type: conn_section
                .and_then(|s| str_field(s, "type"))
                .unwrap_or_default(),
            uuid: conn_section.and_then(|s| str_field(s, "uuid")),
        })
    }

    async fn add_connection(&self, profile: ConnectionProfile) -> Result<OwnedObjectPath> {
        let settings = NMSettingsProxy::new(&self.conn).await?;
        let path = settings
            .add_connection(profile.into_settings())
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: "failed to add connection".to_string(),
                source: e,
            })?;
        debug!("Added connection at {}", path.as_str());
        Ok(path)
    }

    async fn delete_connection(&self, connection: &OwnedObjectPath) -> Result<()> {
        let proxy = self.settings_connection_proxy(connection).await?;
        proxy
            .delete()
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: format!("failed to delete connection {}", connection.as_str()),
                source: e,
            })
    }

    async fn devices(&self) -> Result<Vec<OwnedObjectPath>> {
        let nm = NMProxy::new(&self.conn).await?;
        nm.get_devices()
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: "failed to get device paths from NetworkManager".to_string(),
                source: e,
            })
    }

    async fn all_devices(&self) -> Result<Vec<OwnedObjectPath>> {
        let nm = NMProxy::new(&self.conn).await?;
        nm.get_all_devices()
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: "failed to get all device paths from NetworkManager".to_string(),
                source: e,
            })
    }

    async fn device_type(&self, device: &OwnedObjectPath) -> Result<DeviceType> {
        let dev = self.device_proxy(device).await?;
        let raw = dev
            .device_type()
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: format!("failed to get device type for {}", device.as_str()),
                source: e,
            })?;
        Ok(raw.into())
    }

    async fn device_state(&self, device: &OwnedObjectPath) -> Result<DeviceState> {
        let dev = self.device_proxy(device).await?;
        Ok(dev.state().await?.into())
    }

    async fn activate_connection(
        &self,
        connection: &OwnedObjectPath,
        device: &OwnedObjectPath,
    ) -> Result<OwnedObjectPath> {
        let nm = NMProxy::new(&self.conn).await?;
        let none = OwnedObjectPath::try_from(paths::NONE).map_err(zbus::Error::from)?;
        nm.activate_connection(connection.clone(), device.clone(), none)
            .await
            .map_err(|e| ConnectionError::DbusOperation {
                context: format!(
                    "failed to activate {} on {}",
                    connection.as_str(),
                    device.as_str()
                ),
                source: e,
            })
    }

    async fn access_points(&self, device: &OwnedObjectPath) -> Result<Vec<AccessPoint>> {
        let wifi = self.wireless_proxy(device).await?;
        let mut aps = Vec::new();
        for ap_path in wifi.get_access_points().await? {
            aps.push(self.read_access_point(ap_path).await?);
        }
        Ok(aps)
    }

    async fn active_access_point(&self, device: &OwnedObjectPath) -> Result<Option<AccessPoint>> {
        let wifi = self.wireless_proxy(device).await?;
        let ap_path = wifi.active_access_point().await?;
        if ap_path.as_str() == paths::NONE {
            return Ok(None);
        }
        Ok(Some(self.read_access_point(ap_path).await?))
    }
}
