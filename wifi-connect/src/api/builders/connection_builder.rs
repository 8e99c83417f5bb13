//! Core connection builder for NetworkManager settings.
//!
//! `ConnectionBuilder` assembles the nested settings dictionary shared by
//! every profile: the `connection` section plus `ipv4` / `ipv6`. The Wi-Fi
//! profile builder layers its own sections on top with
//! [`ConnectionBuilder::with_section`].
//!
//! # Example
//!
//! ```rust
//! use wifi_connect::builders::{ConnectionBuilder, IpConfig};
//!
//! let profile = ConnectionBuilder::new("802-11-wireless", "hotspot")
//!     .autoconnect(false)
//!     .interface_name("wlan0")
//!     .ipv4_manual(vec![IpConfig::new("192.168.42.1", 24)])
//!     .ipv6_auto()
//!     .build();
//!
//! assert_eq!(profile.id(), Some("hotspot"));
//! ```

use std::collections::HashMap;
use uuid::Uuid;
use zvariant::Value;

use crate::types::constants::section;

/// One settings section: key to D-Bus variant.
pub type Section = HashMap<&'static str, Value<'static>>;

/// A full settings dictionary (`a{sa{sv}}` on the wire).
pub type Settings = HashMap<&'static str, Section>;

/// IP address configuration with CIDR prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpConfig {
    pub address: String,
    pub prefix: u32,
}

impl IpConfig {
    /// Creates a new IP configuration.
    pub fn new(address: impl Into<String>, prefix: u32) -> Self {
        Self {
            address: address.into(),
            prefix,
        }
    }
}

/// A connection description ready to be handed to NetworkManager.
///
/// Once submitted, NetworkManager persists it and owns it; this value is
/// only the transient request.
#[derive(Debug, PartialEq)]
pub struct ConnectionProfile {
    settings: Settings,
}

impl ConnectionProfile {
    /// Returns a settings section, if present.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.settings.get(name)
    }

    /// Returns a single value from a section.
    pub fn get(&self, section: &str, key: &str) -> Option<&Value<'static>> {
        self.settings.get(section).and_then(|s| s.get(key))
    }

    fn get_str(&self, section: &str, key: &str) -> Option<&str> {
        match self.get(section, key) {
            Some(Value::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The human-readable connection name (`connection.id`).
    pub fn id(&self) -> Option<&str> {
        self.get_str(section::CONNECTION, "id")
    }

    /// The generated unique identifier (`connection.uuid`).
    pub fn uuid(&self) -> Option<&str> {
        self.get_str(section::CONNECTION, "uuid")
    }

    /// The declared connection type (`connection.type`).
    pub fn connection_type(&self) -> Option<&str> {
        self.get_str(section::CONNECTION, "type")
    }

    /// Consumes the profile, returning the raw settings dictionary.
    pub fn into_settings(self) -> Settings {
        self.settings
    }
}

/// Core connection settings builder.
///
/// Manages the `connection`, `ipv4` and `ipv6` sections. Type-specific
/// sections are added with [`with_section`](Self::with_section).
pub struct ConnectionBuilder {
    settings: Settings,
}

impl ConnectionBuilder {
    /// Creates a new connection builder with the specified type and ID.
    ///
    /// A random UUID is generated for every builder.
    pub fn new(connection_type: &str, id: impl Into<String>) -> Self {
        let mut settings = HashMap::new();
        let mut connection = HashMap::new();

        connection.insert("type", Value::from(connection_type.to_string()));
        connection.insert("id", Value::from(id.into()));
        connection.insert("uuid", Value::from(Uuid::new_v4().to_string()));

        settings.insert(section::CONNECTION, connection);

        Self { settings }
    }

    /// Sets a specific UUID for the connection.
    pub fn uuid(mut self, uuid: Uuid) -> Self {
        if let Some(conn) = self.settings.get_mut(section::CONNECTION) {
            conn.insert("uuid", Value::from(uuid.to_string()));
        }
        self
    }

    /// Restricts the connection to a specific interface (e.g. "wlan0").
    pub fn interface_name(mut self, name: impl Into<String>) -> Self {
        if let Some(conn) = self.settings.get_mut(section::CONNECTION) {
            conn.insert("interface-name", Value::from(name.into()));
        }
        self
    }

    /// Enables or disables automatic connection on boot/availability.
    pub fn autoconnect(mut self, enabled: bool) -> Self {
        if let Some(conn) = self.settings.get_mut(section::CONNECTION) {
            conn.insert("autoconnect", Value::from(enabled));
        }
        self
    }

    /// Configures IPv4 to use automatic configuration (DHCP).
    pub fn ipv4_auto(mut self) -> Self {
        let mut ipv4 = HashMap::new();
        ipv4.insert("method", Value::from("auto"));
        self.settings.insert(section::IPV4, ipv4);
        self
    }

    /// Configures IPv4 with manual (static) addresses.
    pub fn ipv4_manual(mut self, addresses: Vec<IpConfig>) -> Self {
        let mut ipv4 = HashMap::new();
        ipv4.insert("method", Value::from("manual"));

        let address_data: Vec<HashMap<String, Value<'static>>> = addresses
            .into_iter()
            .map(|config| {
                let mut addr_dict = HashMap::new();
                addr_dict.insert("address".to_string(), Value::from(config.address));
                addr_dict.insert("prefix".to_string(), Value::from(config.prefix));
                addr_dict
            })
            .collect();

        ipv4.insert("address-data", Value::from(address_data));
        self.settings.insert(section::IPV4, ipv4);
        self
    }

    /// Configures IPv6 to use automatic configuration (SLAAC/DHCPv6).
    pub fn ipv6_auto(mut self) -> Self {
        let mut ipv6 = HashMap::new();
        ipv6.insert("method", Value::from("auto"));
        self.settings.insert(section::IPV6, ipv6);
        self
    }

    /// Adds or replaces a complete settings section.
    pub fn with_section(mut self, name: &'static str, section: Section) -> Self {
        self.settings.insert(name, section);
        self
    }

    /// Builds the final profile.
    pub fn build(self) -> ConnectionProfile {
        ConnectionProfile {
            settings: self.settings,
        }
    }
}
