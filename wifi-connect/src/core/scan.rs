//! Access point enumeration.

use log::{debug, info};
use std::collections::HashSet;

use crate::Result;
use crate::api::models::{AccessPointSummary, DeviceType, Security};
use crate::backend::NmBackend;
use crate::core::device::first_wireless_device;

/// What to leave out of, and add to, a scan listing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanFilter<'a> {
    /// SSIDs starting with this prefix are dropped. Empty disables the filter.
    pub exclude_prefix: &'a str,
    /// When set, a `HIDDEN` entry with this SSID is appended.
    pub hidden_placeholder: Option<&'a str>,
}

impl ScanFilter<'_> {
    fn excludes(&self, ssid: &str) -> bool {
        !self.exclude_prefix.is_empty() && ssid.starts_with(self.exclude_prefix)
    }
}

/// Lists the access points visible on every Wi-Fi device.
///
/// Entries are unique by SSID and security, in discovery order. Devices
/// that are not Wi-Fi are skipped.
pub(crate) async fn scan_access_points<B>(
    backend: &B,
    filter: ScanFilter<'_>,
) -> Result<Vec<AccessPointSummary>>
where
    B: NmBackend + ?Sized,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for dev in backend.devices().await? {
        if backend.device_type(&dev).await? != DeviceType::Wifi {
            continue;
        }

        for ap in backend.access_points(&dev).await? {
            let entry = ap.summary();
            if filter.excludes(&entry.ssid) || !seen.insert(entry.clone()) {
                continue;
            }
            out.push(entry);
        }
    }

    if let Some(placeholder) = filter.hidden_placeholder {
        out.push(AccessPointSummary::new(placeholder, Security::Hidden));
    }

    debug!("Available SSIDs: {out:?}");
    Ok(out)
}

/// Returns the access point the first Wi-Fi device is associated with.
///
/// # Errors
///
/// [`ConnectionError::NoWifiDevice`](crate::ConnectionError::NoWifiDevice)
/// when the system has no Wi-Fi device.
pub(crate) async fn current_access_point<B>(backend: &B) -> Result<Option<AccessPointSummary>>
where
    B: NmBackend + ?Sized,
{
    let dev = first_wireless_device(backend).await?;
    let active = backend.active_access_point(&dev).await?.map(|ap| ap.summary());

    match &active {
        Some(ap) => info!("Active access point: {} ({})", ap.ssid, ap.security),
        None => info!("No active access point"),
    }
    Ok(active)
}
