use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use zvariant::OwnedObjectPath;

use crate::types::constants::connection_type;
use crate::types::flags::{ApFlags, ApSecurityFlags};

/// Simplified security class of a visible network.
///
/// This is what the captive portal needs to decide which credential fields
/// to show. `Hidden` never comes from an access point; it labels the
/// placeholder entry that lets the user type in a hidden SSID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Security {
    None,
    Wep,
    Wpa,
    Wpa2,
    Enterprise,
    Hidden,
}

impl Security {
    /// Decodes the three access point flag fields into a security class.
    ///
    /// Precedence, highest first: 802.1X key management in either WPA or RSN
    /// flags, any RSN flag, any WPA flag, the privacy bit with no WPA/RSN
    /// flags at all.
    pub fn from_flags(flags: ApFlags, wpa: ApSecurityFlags, rsn: ApSecurityFlags) -> Self {
        if wpa.contains(ApSecurityFlags::KEY_MGMT_802_1X)
            || rsn.contains(ApSecurityFlags::KEY_MGMT_802_1X)
        {
            Self::Enterprise
        } else if !rsn.is_empty() {
            Self::Wpa2
        } else if !wpa.is_empty() {
            Self::Wpa
        } else if flags.contains(ApFlags::PRIVACY) {
            Self::Wep
        } else {
            Self::None
        }
    }

    /// The label sent to the portal UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Wep => "WEP",
            Self::Wpa => "WPA",
            Self::Wpa2 => "WPA2",
            Self::Enterprise => "ENTERPRISE",
            Self::Hidden => "HIDDEN",
        }
    }
}

impl Display for Security {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A visible network as listed to the user.
///
/// Rebuilt on each scan. Two entries are the same network when both SSID and
/// security class match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessPointSummary {
    pub ssid: String,
    pub security: Security,
}

impl AccessPointSummary {
    pub fn new(ssid: impl Into<String>, security: Security) -> Self {
        Self {
            ssid: ssid.into(),
            security,
        }
    }
}

/// Raw access point data as read from NetworkManager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String,
    pub flags: ApFlags,
    pub wpa_flags: ApSecurityFlags,
    pub rsn_flags: ApSecurityFlags,
}

impl AccessPoint {
    pub fn security(&self) -> Security {
        Security::from_flags(self.flags, self.wpa_flags, self.rsn_flags)
    }

    pub fn summary(&self) -> AccessPointSummary {
        AccessPointSummary::new(self.ssid.clone(), self.security())
    }
}

/// A saved connection as returned by [`list_connections`](crate::WifiConnect::list_connections).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSummary {
    pub name: String,
    pub handle: OwnedObjectPath,
}

/// The fields of a saved connection's `connection` section this crate reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub id: String,
    pub connection_type: String,
    pub uuid: Option<String>,
}

impl ConnectionSettings {
    pub fn is_wireless(&self) -> bool {
        self.connection_type == connection_type::WIRELESS
    }
}

/// Requested credential scheme for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionMode {
    /// Local access point hosted by this device.
    Hotspot,
    /// No authentication.
    Open,
    /// Pre-shared key: WEP, WPA, WPA2 and hidden networks.
    Password,
    /// 802.1X with PEAP / MSCHAPv2.
    Enterprise,
}

impl ConnectionMode {
    /// The string the portal form submits for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotspot => "hotspot",
            Self::Open => "NONE",
            Self::Password => "PASSWORD",
            Self::Enterprise => "ENTERPRISE",
        }
    }
}

impl FromStr for ConnectionMode {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HOTSPOT" => Ok(Self::Hotspot),
            "NONE" | "OPEN" => Ok(Self::Open),
            "PASSWORD" => Ok(Self::Password),
            "ENTERPRISE" => Ok(Self::Enterprise),
            _ => Err(ConnectionError::InvalidMode(s.to_string())),
        }
    }
}

impl Display for ConnectionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hotspot => write!(f, "HOTSPOT"),
            Self::Open => write!(f, "OPEN"),
            Self::Password => write!(f, "WEP/WPA/WPA2"),
            Self::Enterprise => write!(f, "ENTERPRISE"),
        }
    }
}

/// NetworkManager device types (`NMDeviceType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Unknown,
    Ethernet,
    Wifi,
    Bluetooth,
    Generic,
    WifiP2P,
    Loopback,
    Other(u32),
}

impl DeviceType {
    /// The device type able to carry a connection of the given `type` string.
    ///
    /// Returns `None` for connection types this crate does not activate.
    pub fn for_connection_type(conn_type: &str) -> Option<Self> {
        match conn_type {
            connection_type::WIRELESS => Some(Self::Wifi),
            connection_type::ETHERNET => Some(Self::Ethernet),
            connection_type::BLUETOOTH => Some(Self::Bluetooth),
            _ => None,
        }
    }
}

impl From<u32> for DeviceType {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Unknown,
            1 => Self::Ethernet,
            2 => Self::Wifi,
            5 => Self::Bluetooth,
            14 => Self::Generic,
            30 => Self::WifiP2P,
            32 => Self::Loopback,
            v => Self::Other(v),
        }
    }
}

impl Display for DeviceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Ethernet => write!(f, "Ethernet"),
            Self::Wifi => write!(f, "Wi-Fi"),
            Self::Bluetooth => write!(f, "Bluetooth"),
            Self::Generic => write!(f, "Generic"),
            Self::WifiP2P => write!(f, "Wi-Fi P2P"),
            Self::Loopback => write!(f, "Loopback"),
            Self::Other(v) => write!(f, "Other({v})"),
        }
    }
}

/// NetworkManager device states (`NMDeviceState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceState {
    Unknown,
    Unmanaged,
    Unavailable,
    Disconnected,
    Prepare,
    Config,
    NeedAuth,
    IpConfig,
    IpCheck,
    Secondaries,
    Activated,
    Deactivating,
    Failed,
    Other(u32),
}

impl From<u32> for DeviceState {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Unknown,
            10 => Self::Unmanaged,
            20 => Self::Unavailable,
            30 => Self::Disconnected,
            40 => Self::Prepare,
            50 => Self::Config,
            60 => Self::NeedAuth,
            70 => Self::IpConfig,
            80 => Self::IpCheck,
            90 => Self::Secondaries,
            100 => Self::Activated,
            110 => Self::Deactivating,
            120 => Self::Failed,
            v => Self::Other(v),
        }
    }
}

impl Display for DeviceState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Unmanaged => write!(f, "Unmanaged"),
            Self::Unavailable => write!(f, "Unavailable"),
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Prepare => write!(f, "Preparing"),
            Self::Config => write!(f, "Configuring"),
            Self::NeedAuth => write!(f, "Waiting for secrets"),
            Self::IpConfig => write!(f, "Requesting IP configuration"),
            Self::IpCheck => write!(f, "Checking IP connectivity"),
            Self::Secondaries => write!(f, "Waiting for secondaries"),
            Self::Activated => write!(f, "Activated"),
            Self::Deactivating => write!(f, "Deactivating"),
            Self::Failed => write!(f, "Failed"),
            Self::Other(v) => write!(f, "Other({v})"),
        }
    }
}

/// Errors that can occur while driving NetworkManager.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// A required argument (mode, SSID, credential) was not supplied.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The requested connection mode is not one this crate can build.
    #[error("invalid connection mode: \"{0}\"")]
    InvalidMode(String),

    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A D-Bus call failed; `context` says which one.
    #[error("{context}: {source}")]
    DbusOperation {
        context: String,
        #[source]
        source: zbus::Error,
    },

    /// No saved connection carries the given name.
    #[error("no connection named \"{0}\"")]
    NotFound(String),

    /// No device can carry a connection of the given type.
    #[error("no suitable device found for connection type {0}")]
    NoSuitableDevice(String),

    /// No Wi-Fi device was found on the system.
    #[error("no Wi-Fi device found")]
    NoWifiDevice,

    /// The device did not reach the activated state within the poll budget.
    #[error("connection \"{name}\" not activated after {polls} polls (last state: {last_state})")]
    ActivationTimeout {
        name: String,
        polls: u32,
        last_state: DeviceState,
    },

    /// The wait was cancelled by the caller.
    #[error("wait cancelled")]
    Cancelled,
}
