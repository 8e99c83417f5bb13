//! Wi-Fi connection profiles for the four supported modes.
//!
//! Every mode has a fixed shape:
//!
//! | mode         | 802-11-wireless     | security                     | ipv4                 |
//! |--------------|---------------------|------------------------------|----------------------|
//! | `Hotspot`    | `ap`, band `bg`     | none                         | manual 192.168.42.1/24 |
//! | `Open`       | `infrastructure`    | none                         | auto                 |
//! | `Password`   | `infrastructure`    | `wpa-psk` + psk              | auto                 |
//! | `Enterprise` | `infrastructure`    | `wpa-eap`, PEAP / MSCHAPv2   | auto                 |
//!
//! IPv6 is always `auto`. The hotspot is pinned to the configured wireless
//! interface and never autoconnects.

use std::collections::HashMap;
use zvariant::Value;

use crate::Result;
use crate::api::builders::connection_builder::{
    ConnectionBuilder, ConnectionProfile, IpConfig, Section,
};
use crate::api::models::{ConnectionError, ConnectionMode};
use crate::types::constants::{connection_type, section};

const DEFAULT_HOTSPOT_INTERFACE: &str = "wlan0";
const DEFAULT_HOTSPOT_ADDRESS: &str = "192.168.42.1";
const DEFAULT_HOTSPOT_PREFIX: u32 = 24;

/// Creates a D-Bus string array value.
fn string_array(xs: &[&str]) -> Value<'static> {
    let vals: Vec<String> = xs.iter().map(|s| s.to_string()).collect();
    Value::from(vals)
}

/// Builds the `802-11-wireless` section. The SSID is sent as raw bytes.
fn wireless_section(ssid: &str, mode: &'static str, secured: bool) -> Section {
    let mut s = HashMap::new();
    s.insert("ssid", Value::from(ssid.as_bytes().to_vec()));
    s.insert("mode", Value::from(mode));
    if secured {
        s.insert("security", Value::from(section::WIRELESS_SECURITY));
    }
    s
}

fn psk_security(psk: &str) -> Section {
    let mut sec = HashMap::new();
    sec.insert("key-mgmt", Value::from("wpa-psk"));
    sec.insert("psk", Value::from(psk.to_string()));
    sec
}

/// Returns the `802-11-wireless-security` and `802-1x` sections for PEAP.
fn eap_security(identity: &str, password: &str) -> (Section, Section) {
    let mut sec = HashMap::new();
    sec.insert("key-mgmt", Value::from("wpa-eap"));
    sec.insert("auth-alg", Value::from("open"));

    let mut e1x = HashMap::new();
    e1x.insert("eap", string_array(&["peap"]));
    e1x.insert("identity", Value::from(identity.to_string()));
    e1x.insert("password", Value::from(password.to_string()));
    e1x.insert("phase2-auth", Value::from("mschapv2"));

    (sec, e1x)
}

/// Builds connection profiles for each [`ConnectionMode`].
///
/// Holds the hotspot parameters that are device-specific; everything else
/// about a profile's shape is fixed by its mode.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    hotspot_interface: String,
    hotspot_address: IpConfig,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self {
            hotspot_interface: DEFAULT_HOTSPOT_INTERFACE.to_string(),
            hotspot_address: IpConfig::new(DEFAULT_HOTSPOT_ADDRESS, DEFAULT_HOTSPOT_PREFIX),
        }
    }
}

impl ProfileBuilder {
    pub fn new(hotspot_interface: impl Into<String>, hotspot_address: IpConfig) -> Self {
        Self {
            hotspot_interface: hotspot_interface.into(),
            hotspot_address,
        }
    }

    /// Builds the profile for `mode`.
    ///
    /// Pure: no I/O happens here. Two calls with identical arguments differ
    /// only in the generated UUID.
    ///
    /// # Errors
    ///
    /// - [`ConnectionError::MissingArgument`] when the mode, connection name
    ///   or SSID is absent, or when the mode needs a credential that was not
    ///   supplied (password for `Password`, username and password for
    ///   `Enterprise`).
    pub fn build(
        &self,
        mode: Option<ConnectionMode>,
        connection_name: &str,
        ssid: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<ConnectionProfile> {
        let mode = mode.ok_or(ConnectionError::MissingArgument("mode"))?;
        let ssid = ssid
            .filter(|s| !s.is_empty())
            .ok_or(ConnectionError::MissingArgument("ssid"))?;
        if connection_name.is_empty() {
            return Err(ConnectionError::MissingArgument("connection name"));
        }

        let base = ConnectionBuilder::new(connection_type::WIRELESS, connection_name);

        let profile = match mode {
            ConnectionMode::Hotspot => {
                let mut wireless = wireless_section(ssid, "ap", false);
                wireless.insert("band", Value::from("bg"));
                base.autoconnect(false)
                    .interface_name(self.hotspot_interface.clone())
                    .with_section(section::WIRELESS, wireless)
                    .ipv4_manual(vec![self.hotspot_address.clone()])
                    .ipv6_auto()
                    .build()
            }
            ConnectionMode::Open => base
                .with_section(section::WIRELESS, wireless_section(ssid, "infrastructure", false))
                .ipv4_auto()
                .ipv6_auto()
                .build(),
            ConnectionMode::Password => {
                let psk = password.ok_or(ConnectionError::MissingArgument("password"))?;
                base.with_section(section::WIRELESS, wireless_section(ssid, "infrastructure", true))
                    .with_section(section::WIRELESS_SECURITY, psk_security(psk))
                    .ipv4_auto()
                    .ipv6_auto()
                    .build()
            }
            ConnectionMode::Enterprise => {
                let identity = username.ok_or(ConnectionError::MissingArgument("username"))?;
                let password = password.ok_or(ConnectionError::MissingArgument("password"))?;
                let (sec, e1x) = eap_security(identity, password);
                base.with_section(section::WIRELESS, wireless_section(ssid, "infrastructure", true))
                    .with_section(section::WIRELESS_SECURITY, sec)
                    .with_section(section::IEEE_8021X, e1x)
                    .ipv4_auto()
                    .ipv6_auto()
                    .build()
            }
        };

        Ok(profile)
    }
}

/// Builds a profile with the default hotspot parameters (`wlan0`,
/// 192.168.42.1/24). See [`ProfileBuilder::build`].
pub fn build_profile(
    mode: Option<ConnectionMode>,
    connection_name: &str,
    ssid: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
) -> Result<ConnectionProfile> {
    ProfileBuilder::default().build(mode, connection_name, ssid, username, password)
}
