use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::api::builders::{ConnectionProfile, IpConfig, ProfileBuilder};
use crate::api::models::{AccessPointSummary, ConnectionMode, ConnectionSummary};
use crate::backend::{DbusBackend, NmBackend};
use crate::config::Config;
use crate::core::connection::{ActivationPlan, activate};
use crate::core::connection_settings::{delete_all_wireless, delete_connection, list_connections};
use crate::core::reachability::is_reachable;
use crate::core::scan::{ScanFilter, current_access_point, scan_access_points};
use crate::core::state_wait::PollSchedule;
use crate::or_false;

/// Wi-Fi configurator over NetworkManager.
///
/// Every operation runs to completion before returning; nothing is spawned
/// in the background. Operations that change NetworkManager state report
/// success as a `bool` and log the reason for any failure. Read-only
/// operations return [`Result`].
///
/// # Example
///
/// ```no_run
/// use wifi_connect::{Config, ConnectionMode, WifiConnect};
///
/// # async fn example() -> wifi_connect::Result<()> {
/// let wifi = WifiConnect::new(Config::from_env()).await?;
///
/// for ap in wifi.list_access_points(true).await? {
///     println!("{} ({})", ap.ssid, ap.security);
/// }
///
/// if !wifi.connect(Some(ConnectionMode::Password), "wifi-connect", Some("CafeNet"), None, Some("secret")).await {
///     wifi.start_hotspot().await;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WifiConnect<B: NmBackend = DbusBackend> {
    backend: B,
    config: Config,
    builder: ProfileBuilder,
}

impl WifiConnect<DbusBackend> {
    /// Connects to NetworkManager on the system bus.
    pub async fn new(config: Config) -> Result<Self> {
        let backend = DbusBackend::system().await?;
        Ok(Self::with_backend(backend, config))
    }
}

impl<B: NmBackend> WifiConnect<B> {
    /// Drives the given backend instead of the system bus.
    pub fn with_backend(backend: B, config: Config) -> Self {
        let builder = ProfileBuilder::new(
            config.hotspot_interface.clone(),
            IpConfig::new(config.hotspot_address.to_string(), config.hotspot_prefix),
        );
        Self {
            backend,
            config,
            builder,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The profile builder configured for this device's hotspot.
    pub fn profile_builder(&self) -> &ProfileBuilder {
        &self.builder
    }

    /// SSID this device advertises when hosting its hotspot.
    pub fn hotspot_ssid(&self) -> String {
        self.config.hotspot_ssid()
    }

    /// Returns true if the configured reachability target accepts a TCP
    /// connection.
    pub async fn have_active_internet_connection(&self) -> bool {
        let target = &self.config.reachability;
        let online = is_reachable(&target.host, target.port, target.timeout).await;
        debug!("Internet reachable: {online}");
        online
    }

    /// Lists visible networks, without this system's own hotspots.
    ///
    /// With `include_hidden`, a `HIDDEN` placeholder entry is appended so the
    /// user can type in an SSID that is not broadcast. An empty list means
    /// nothing was found.
    pub async fn list_access_points(&self, include_hidden: bool) -> Result<Vec<AccessPointSummary>> {
        let filter = ScanFilter {
            exclude_prefix: &self.config.hotspot_ssid_prefix,
            hidden_placeholder: include_hidden.then_some(self.config.hidden_placeholder_ssid.as_str()),
        };
        scan_access_points(&self.backend, filter).await
    }

    /// The access point the first Wi-Fi device is associated with, if any.
    pub async fn active_access_point(&self) -> Result<Option<AccessPointSummary>> {
        current_access_point(&self.backend).await
    }

    /// Starts the local hotspot under the configured hotspot connection name.
    pub async fn start_hotspot(&self) -> bool {
        let ssid = self.hotspot_ssid();
        info!("Starting hotspot {ssid}");
        self.connect(
            Some(ConnectionMode::Hotspot),
            &self.config.hotspot_connection_name,
            Some(&ssid),
            None,
            None,
        )
        .await
    }

    /// Removes the hotspot connection.
    pub async fn stop_hotspot(&self) -> bool {
        info!("Stopping hotspot");
        self.delete_connection(&self.config.hotspot_connection_name)
            .await
    }

    /// Builds a profile for `mode` and activates it, waiting up to the
    /// configured number of polls.
    pub async fn connect(
        &self,
        mode: Option<ConnectionMode>,
        connection_name: &str,
        ssid: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> bool {
        let profile = or_false!(
            self.builder
                .build(mode, connection_name, ssid, username, password),
            format!("Connection {connection_name} not created")
        );
        if let Some(mode) = mode {
            info!(
                "Connecting {connection_name} to {} as {mode}",
                ssid.unwrap_or_default()
            );
        }
        self.activate(profile, connection_name, self.config.activation_max_wait)
            .await
    }

    /// Registers `profile` under `connection_name`, activates it and polls up
    /// to `max_wait` times for the device to come up.
    ///
    /// Returns true only if the device reports `Activated`. Every failure is
    /// logged with the connection name.
    pub async fn activate(
        &self,
        profile: ConnectionProfile,
        connection_name: &str,
        max_wait: u32,
    ) -> bool {
        self.run_activation(profile, connection_name, max_wait, None)
            .await
    }

    /// Like [`activate`](Self::activate), but the wait for the device can be
    /// interrupted through `cancel`. A cancelled wait reports `false`.
    pub async fn activate_with_cancel(
        &self,
        profile: ConnectionProfile,
        connection_name: &str,
        max_wait: u32,
        cancel: &CancellationToken,
    ) -> bool {
        self.run_activation(profile, connection_name, max_wait, Some(cancel))
            .await
    }

    async fn run_activation(
        &self,
        profile: ConnectionProfile,
        connection_name: &str,
        max_wait: u32,
        cancel: Option<&CancellationToken>,
    ) -> bool {
        let plan = ActivationPlan {
            schedule: PollSchedule::new(self.config.poll_interval, max_wait),
            settle: self.config.settle_delay,
            cancel,
        };

        match activate(&self.backend, profile, connection_name, plan).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Connection {connection_name} failed: {e}");
                false
            }
        }
    }

    /// Saved connections with their names.
    pub async fn list_connections(&self) -> Result<Vec<ConnectionSummary>> {
        list_connections(&self.backend).await
    }

    /// Deletes the connection called `name`.
    ///
    /// Returns false if no such connection exists (no deletion is attempted)
    /// or if NetworkManager refuses.
    pub async fn delete_connection(&self, name: &str) -> bool {
        or_false!(
            delete_connection(&self.backend, name, self.config.settle_delay).await,
            format!("Connection {name} not deleted")
        );
        info!("Deleted connection {name}");
        true
    }

    /// Deletes every saved Wi-Fi connection.
    pub async fn delete_all_wireless_connections(&self) -> bool {
        let count = or_false!(
            delete_all_wireless(&self.backend, self.config.settle_delay).await,
            "Wireless connections not deleted"
        );
        info!("Deleted {count} wireless connection(s)");
        true
    }
}
