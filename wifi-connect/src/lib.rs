//! Wi-Fi configuration for provisioning devices, driven through NetworkManager.
//!
//! This crate covers the control-plane work a captive-portal setup flow
//! needs:
//!
//! - Listing visible networks with a simplified security class
//! - Hosting a local hotspot so the user can pick a network
//! - Connecting with open, WEP/WPA/WPA2 pre-shared-key or 802.1X
//!   (PEAP/MSCHAPv2) credentials
//! - Removing saved connections
//! - Checking internet reachability
//!
//! # Example
//!
//! ```no_run
//! use wifi_connect::{Config, WifiConnect};
//!
//! # async fn example() -> wifi_connect::Result<()> {
//! let wifi = WifiConnect::new(Config::from_env()).await?;
//!
//! if !wifi.have_active_internet_connection().await {
//!     wifi.start_hotspot().await;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Read-only operations return `Result<T, ConnectionError>`. Operations that
//! change NetworkManager state (`connect`, `activate`, `start_hotspot`,
//! `stop_hotspot`, `delete_connection`, `delete_all_wireless_connections`)
//! return `bool`: failures are logged with context and reported as `false`,
//! so a caller can always retry or fall back to the hotspot.
//!
//! # Waiting for Activation
//!
//! Activation is confirmed by polling the device state on a fixed interval
//! (one second by default, thirty polls). See [`PollSchedule`].
//!
//! # Logging
//!
//! This crate logs through the [`log`](https://docs.rs/log) facade and never
//! installs a logger itself. Binaries can use [`logging::FileLogger`] for a
//! rotated log file, or any other `log` implementation.

// Internal implementation modules
mod core;
mod dbus;
mod types;
mod util;

// Public API modules
pub mod api;
pub mod backend;
pub mod config;
pub mod logging;

pub use api::builders;
pub use api::models::{
    AccessPoint, AccessPointSummary, ConnectionError, ConnectionMode, ConnectionSettings,
    ConnectionSummary, DeviceState, DeviceType, Security,
};
pub use api::wifi_connect::WifiConnect;
pub use backend::{DbusBackend, NmBackend};
pub use config::Config;
pub use crate::core::reachability::is_reachable;
pub use crate::core::state_wait::PollSchedule;
pub use types::flags::{ApFlags, ApSecurityFlags};

/// A specialized `Result` type for Wi-Fi operations.
pub type Result<T> = std::result::Result<T, ConnectionError>;
