//! Runtime configuration.
//!
//! Defaults match a stock PFC EDU device. The only value read from the
//! environment is the device name that becomes part of the hotspot SSID.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::constants::timeouts;

/// Environment variable carrying the device name set at provisioning time.
pub const DEVICE_NAME_VAR: &str = "RESIN_DEVICE_NAME_AT_INIT";

const DEFAULT_DEVICE_NAME: &str = "aged-cheese";

/// Where the reachability check connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachabilityTarget {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Default for ReachabilityTarget {
    fn default() -> Self {
        // google-public-dns-a, DNS over TCP
        Self {
            host: "8.8.8.8".to_string(),
            port: 53,
            timeout: timeouts::reachability_timeout(),
        }
    }
}

/// Log file location and retention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: PathBuf,
    /// File name stem; files are written as `<stem>.<YYYY-MM-DD>.log`.
    pub stem: String,
    pub retention_days: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        let mut dir = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        dir.push("wifi-connect");
        Self {
            dir,
            stem: "netman".to_string(),
            retention_days: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Connection name of the local hotspot profile.
    pub hotspot_connection_name: String,
    /// Connection name used for user-selected networks.
    pub generic_connection_name: String,
    /// SSID prefix shared by every device's hotspot. Networks starting with
    /// it are never offered as connection targets.
    pub hotspot_ssid_prefix: String,
    pub device_name: String,
    /// Interface the hotspot is pinned to.
    pub hotspot_interface: String,
    pub hotspot_address: Ipv4Addr,
    pub hotspot_prefix: u32,
    /// SSID text of the placeholder entry for hidden networks.
    pub hidden_placeholder_ssid: String,
    pub poll_interval: Duration,
    /// Default number of state polls while waiting for activation.
    pub activation_max_wait: u32,
    /// Pause after deletions so NetworkManager can propagate them.
    pub settle_delay: Duration,
    pub reachability: ReachabilityTarget,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotspot_connection_name: "hotspot".to_string(),
            generic_connection_name: "wifi-connect".to_string(),
            hotspot_ssid_prefix: "PFC_EDU-".to_string(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            hotspot_interface: "wlan0".to_string(),
            hotspot_address: Ipv4Addr::new(192, 168, 42, 1),
            hotspot_prefix: 24,
            hidden_placeholder_ssid: "Enter a hidden WiFi name".to_string(),
            poll_interval: timeouts::poll_interval(),
            activation_max_wait: timeouts::ACTIVATION_MAX_POLLS,
            settle_delay: timeouts::settle_delay(),
            reachability: ReachabilityTarget::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Defaults, with the device name taken from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, with the device name taken from `lookup`.
    ///
    /// An unset or empty variable keeps the default device name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(name) = lookup(DEVICE_NAME_VAR).filter(|n| !n.trim().is_empty()) {
            config.device_name = name;
        }
        config
    }

    /// SSID the local hotspot advertises.
    pub fn hotspot_ssid(&self) -> String {
        format!("{}{}", self.hotspot_ssid_prefix, self.device_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hotspot_ssid_uses_fallback_name() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.hotspot_ssid(), "PFC_EDU-aged-cheese");
    }

    #[test]
    fn device_name_comes_from_environment_variable() {
        let config = Config::from_lookup(|key| {
            (key == DEVICE_NAME_VAR).then(|| "mydevice".to_string())
        });
        assert_eq!(config.device_name, "mydevice");
        assert_eq!(config.hotspot_ssid(), "PFC_EDU-mydevice");
    }

    #[test]
    fn empty_device_name_keeps_default() {
        let config = Config::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.device_name, "aged-cheese");
    }

    #[test]
    fn defaults_match_device_layout() {
        let config = Config::default();
        assert_eq!(config.hotspot_connection_name, "hotspot");
        assert_eq!(config.hotspot_address, Ipv4Addr::new(192, 168, 42, 1));
        assert_eq!(config.hotspot_prefix, 24);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.activation_max_wait, 30);
        assert_eq!(config.settle_delay, Duration::from_secs(2));
        assert_eq!(config.reachability.port, 53);
        assert_eq!(config.log.retention_days, 15);
    }
}
