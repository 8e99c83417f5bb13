//! Constants for NetworkManager D-Bus interface values.
//!
//! Connection type strings, settings section names and the default timing
//! used by activation and deletion.

/// Connection `type` strings as stored in the `connection` settings section.
pub mod connection_type {
    pub const WIRELESS: &str = "802-11-wireless";
    pub const ETHERNET: &str = "802-3-ethernet";
    pub const BLUETOOTH: &str = "bluetooth";
}

/// Settings section names of a connection profile.
pub mod section {
    pub const CONNECTION: &str = "connection";
    pub const WIRELESS: &str = "802-11-wireless";
    pub const WIRELESS_SECURITY: &str = "802-11-wireless-security";
    pub const IEEE_8021X: &str = "802-1x";
    pub const IPV4: &str = "ipv4";
    pub const IPV6: &str = "ipv6";
}

/// Well-known object paths.
pub mod paths {
    /// Placeholder path NetworkManager uses for "no object".
    pub const NONE: &str = "/";
}

/// Default timing for activation polling and deletion settling.
pub mod timeouts {
    use std::time::Duration;

    /// Interval between device state checks while waiting for activation.
    const POLL_INTERVAL_SECS: u64 = 1;

    /// Number of polls before an activation is reported as failed.
    pub const ACTIVATION_MAX_POLLS: u32 = 30;

    /// Time NetworkManager gets to propagate a connection removal.
    const SETTLE_DELAY_SECS: u64 = 2;

    /// Timeout for the outbound reachability check.
    const REACHABILITY_TIMEOUT_SECS: u64 = 2;

    pub fn poll_interval() -> Duration {
        Duration::from_secs(POLL_INTERVAL_SECS)
    }

    pub fn settle_delay() -> Duration {
        Duration::from_secs(SETTLE_DELAY_SECS)
    }

    pub fn reachability_timeout() -> Duration {
        Duration::from_secs(REACHABILITY_TIMEOUT_SECS)
    }
}
