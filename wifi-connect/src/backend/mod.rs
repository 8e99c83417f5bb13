//! The connection-manager seam.
//!
//! [`NmBackend`] is the exact set of NetworkManager operations this crate
//! consumes. Everything in `core` is written against it, so the same
//! orchestration runs over the system bus ([`DbusBackend`]) or over an
//! in-memory implementation in tests.
//!
//! Objects are addressed by their D-Bus object path. Implementations return
//! [`ConnectionError`](crate::ConnectionError) for any failure of the
//! underlying call.

use async_trait::async_trait;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::builders::ConnectionProfile;
use crate::api::models::{AccessPoint, ConnectionSettings, DeviceState, DeviceType};

mod dbus;

pub use dbus::DbusBackend;

#[async_trait]
pub trait NmBackend: Send + Sync {
    /// `Settings.ListConnections`
    async fn list_connections(&self) -> Result<Vec<OwnedObjectPath>>;

    /// `Settings.Connection.GetSettings`, reduced to the `connection` section.
    async fn connection_settings(&self, connection: &OwnedObjectPath)
    -> Result<ConnectionSettings>;

    /// `Settings.AddConnection`; returns the new connection's path.
    async fn add_connection(&self, profile: ConnectionProfile) -> Result<OwnedObjectPath>;

    /// `Settings.Connection.Delete`
    async fn delete_connection(&self, connection: &OwnedObjectPath) -> Result<()>;

    /// `GetDevices`
    async fn devices(&self) -> Result<Vec<OwnedObjectPath>>;

    /// `GetAllDevices`
    async fn all_devices(&self) -> Result<Vec<OwnedObjectPath>>;

    /// `Device.DeviceType`
    async fn device_type(&self, device: &OwnedObjectPath) -> Result<DeviceType>;

    /// `Device.State`
    async fn device_state(&self, device: &OwnedObjectPath) -> Result<DeviceState>;

    /// `ActivateConnection` with no specific object. Returns the active
    /// connection path; activation itself completes asynchronously.
    async fn activate_connection(
        &self,
        connection: &OwnedObjectPath,
        device: &OwnedObjectPath,
    ) -> Result<OwnedObjectPath>;

    /// Access points visible to a wireless device.
    async fn access_points(&self, device: &OwnedObjectPath) -> Result<Vec<AccessPoint>>;

    /// The access point a wireless device is associated with, if any.
    async fn active_access_point(&self, device: &OwnedObjectPath) -> Result<Option<AccessPoint>>;
}
