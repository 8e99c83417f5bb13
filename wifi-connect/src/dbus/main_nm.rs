//! Main NetworkManager proxy.

use zbus::proxy;
use zvariant::OwnedObjectPath;

/// Proxy for the main NetworkManager interface.
///
/// Provides device enumeration and connection activation.
#[proxy(
    interface = "org.freedesktop.NetworkManager",
    default_service = "org.freedesktop.NetworkManager",
    default_path = "/org/freedesktop/NetworkManager"
)]
pub trait NM {
    /// Returns paths to all realized network devices.
    fn get_devices(&self) -> zbus::Result<Vec<OwnedObjectPath>>;

    /// Returns paths to all devices, including placeholder (unrealized) ones.
    fn get_all_devices(&self) -> zbus::Result<Vec<OwnedObjectPath>>;

    /// Activates an existing saved connection.
    ///
    /// Returns the path of the new active connection. Activation continues
    /// asynchronously inside NetworkManager after this returns.
    fn activate_connection(
        &self,
        connection: OwnedObjectPath,
        device: OwnedObjectPath,
        specific_object: OwnedObjectPath,
    ) -> zbus::Result<OwnedObjectPath>;
}
