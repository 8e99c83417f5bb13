//! NetworkManager Settings proxies.

use std::collections::HashMap;
use zbus::{Result, proxy};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

/// Proxy for the connection settings store.
#[proxy(
    interface = "org.freedesktop.NetworkManager.Settings",
    default_service = "org.freedesktop.NetworkManager",
    default_path = "/org/freedesktop/NetworkManager/Settings"
)]
pub trait NMSettings {
    /// Returns paths to all saved connections.
    fn list_connections(&self) -> Result<Vec<OwnedObjectPath>>;

    /// Adds a new connection and saves it to disk.
    fn add_connection(
        &self,
        connection: HashMap<&str, HashMap<&str, Value<'_>>>,
    ) -> Result<OwnedObjectPath>;
}

/// Proxy for a single saved connection.
#[proxy(
    interface = "org.freedesktop.NetworkManager.Settings.Connection",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMSettingsConnection {
    /// Returns the connection's settings, without secrets.
    fn get_settings(&self) -> Result<HashMap<String, HashMap<String, OwnedValue>>>;

    /// Deletes the connection.
    fn delete(&self) -> Result<()>;
}
