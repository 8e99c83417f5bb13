//! Network device lookup.

use log::{debug, warn};
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{ConnectionError, DeviceType};
use crate::backend::NmBackend;

/// Returns the first device (from `GetDevices`) of the given type.
pub(crate) async fn find_device_of_type<B>(
    backend: &B,
    wanted: DeviceType,
) -> Result<Option<OwnedObjectPath>>
where
    B: NmBackend + ?Sized,
{
    for dev in backend.devices().await? {
        if backend.device_type(&dev).await? == wanted {
            return Ok(Some(dev));
        }
    }
    Ok(None)
}

/// Finds a device able to carry a connection of type `conn_type`.
///
/// # Errors
///
/// [`ConnectionError::NoSuitableDevice`] if the connection type maps to no
/// device type, or no device of that type exists.
pub(crate) async fn find_device_for_connection<B>(
    backend: &B,
    conn_type: &str,
) -> Result<OwnedObjectPath>
where
    B: NmBackend + ?Sized,
{
    let found = match DeviceType::for_connection_type(conn_type) {
        Some(wanted) => find_device_of_type(backend, wanted).await?,
        None => None,
    };

    match found {
        Some(dev) => {
            debug!("Found {conn_type} device: {}", dev.as_str());
            Ok(dev)
        }
        None => {
            warn!("No suitable and available {conn_type} device found");
            Err(ConnectionError::NoSuitableDevice(conn_type.to_string()))
        }
    }
}

/// Returns the first Wi-Fi device from `GetAllDevices`.
pub(crate) async fn first_wireless_device<B>(backend: &B) -> Result<OwnedObjectPath>
where
    B: NmBackend + ?Sized,
{
    for dev in backend.all_devices().await? {
        if backend.device_type(&dev).await? == DeviceType::Wifi {
            return Ok(dev);
        }
    }
    Err(ConnectionError::NoWifiDevice)
}
