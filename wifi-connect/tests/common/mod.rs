//! In-memory NetworkManager used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use zvariant::OwnedObjectPath;

use wifi_connect::builders::ConnectionProfile;
use wifi_connect::{
    AccessPoint, ApFlags, ApSecurityFlags, Config, ConnectionError, ConnectionSettings,
    DeviceState, DeviceType, NmBackend, Result, WifiConnect,
};

pub const WIRELESS: &str = "802-11-wireless";
pub const ETHERNET: &str = "802-3-ethernet";

pub fn path(p: &str) -> OwnedObjectPath {
    OwnedObjectPath::try_from(p).unwrap()
}

pub fn ap(ssid: &str, flags: u32, wpa: u32, rsn: u32) -> AccessPoint {
    AccessPoint {
        ssid: ssid.to_string(),
        flags: ApFlags::from(flags),
        wpa_flags: ApSecurityFlags::from(wpa),
        rsn_flags: ApSecurityFlags::from(rsn),
    }
}

/// Defaults with every delay set to zero.
pub fn test_config() -> Config {
    Config {
        poll_interval: Duration::ZERO,
        settle_delay: Duration::ZERO,
        ..Config::default()
    }
}

pub fn wifi(backend: FakeBackend) -> WifiConnect<FakeBackend> {
    WifiConnect::with_backend(backend, test_config())
}

#[derive(Debug)]
pub struct FakeDevice {
    pub path: OwnedObjectPath,
    pub kind: DeviceType,
    pub state: DeviceState,
    /// States reported by successive reads after an activation request. The
    /// last one sticks.
    pub on_activate: VecDeque<DeviceState>,
    pub access_points: Vec<AccessPoint>,
    pub active_ap: Option<AccessPoint>,
    /// Whether `GetDevices` reports it (`GetAllDevices` always does).
    pub realized: bool,
}

impl FakeDevice {
    pub fn new(p: &str, kind: DeviceType) -> Self {
        Self {
            path: path(p),
            kind,
            state: DeviceState::Disconnected,
            on_activate: VecDeque::new(),
            access_points: Vec::new(),
            active_ap: None,
            realized: true,
        }
    }

    pub fn wifi(p: &str) -> Self {
        Self::new(p, DeviceType::Wifi)
    }

    pub fn with_state(mut self, state: DeviceState) -> Self {
        self.state = state;
        self
    }

    pub fn activates_to(mut self, states: &[DeviceState]) -> Self {
        self.on_activate = states.iter().copied().collect();
        self
    }

    pub fn with_access_points(mut self, aps: Vec<AccessPoint>) -> Self {
        self.access_points = aps;
        self
    }

    pub fn associated_with(mut self, ap: AccessPoint) -> Self {
        self.active_ap = Some(ap);
        self
    }

    pub fn unrealized(mut self) -> Self {
        self.realized = false;
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub connections: Vec<(OwnedObjectPath, ConnectionSettings)>,
    pub devices: Vec<FakeDevice>,
    /// Settings of every profile passed to `AddConnection`, in order.
    pub added: Vec<ConnectionSettings>,
    pub next_id: u32,
    pub fail_add: bool,
    pub state_reads: u32,
    pub activations: Vec<(OwnedObjectPath, OwnedObjectPath)>,
    pub deletes: Vec<OwnedObjectPath>,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(self, device: FakeDevice) -> Self {
        self.state().devices.push(device);
        self
    }

    pub fn with_connection(self, id: &str, connection_type: &str) -> Self {
        {
            let mut st = self.state();
            st.next_id += 1;
            let p = path(&format!(
                "/org/freedesktop/NetworkManager/Settings/{}",
                st.next_id
            ));
            st.connections.push((
                p,
                ConnectionSettings {
                    id: id.to_string(),
                    connection_type: connection_type.to_string(),
                    uuid: None,
                },
            ));
        }
        self
    }

    pub fn failing_add(self) -> Self {
        self.state().fail_add = true;
        self
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn connection_names(&self) -> Vec<String> {
        self.state()
            .connections
            .iter()
            .map(|(_, s)| s.id.clone())
            .collect()
    }
}

fn failure(context: &str) -> ConnectionError {
    ConnectionError::DbusOperation {
        context: context.to_string(),
        source: zbus::Error::Failure("rejected by fake".into()),
    }
}

#[async_trait]
impl NmBackend for FakeBackend {
    async fn list_connections(&self) -> Result<Vec<OwnedObjectPath>> {
        Ok(self
            .state()
            .connections
            .iter()
            .map(|(p, _)| p.clone())
            .collect())
    }

    async fn connection_settings(&self, connection: &OwnedObjectPath) -> Result<ConnectionSettings> {
        self.state()
            .connections
            .iter()
            .find(|(p, _)| p == connection)
            .map(|(_, s)| s.clone())
            .ok_or_else(|| failure("GetSettings"))
    }

    async fn add_connection(&self, profile: ConnectionProfile) -> Result<OwnedObjectPath> {
        let mut st = self.state();
        if st.fail_add {
            return Err(failure("AddConnection"));
        }

        let settings = ConnectionSettings {
            id: profile.id().unwrap_or_default().to_string(),
            connection_type: profile.connection_type().unwrap_or_default().to_string(),
            uuid: profile.uuid().map(str::to_string),
        };
        st.next_id += 1;
        let p = path(&format!(
            "/org/freedesktop/NetworkManager/Settings/{}",
            st.next_id
        ));
        st.added.push(settings.clone());
        st.connections.push((p.clone(), settings));
        Ok(p)
    }

    async fn delete_connection(&self, connection: &OwnedObjectPath) -> Result<()> {
        let mut st = self.state();
        st.deletes.push(connection.clone());
        let before = st.connections.len();
        st.connections.retain(|(p, _)| p != connection);
        if st.connections.len() == before {
            return Err(failure("Delete"));
        }
        Ok(())
    }

    async fn devices(&self) -> Result<Vec<OwnedObjectPath>> {
        Ok(self
            .state()
            .devices
            .iter()
            .filter(|d| d.realized)
            .map(|d| d.path.clone())
            .collect())
    }

    async fn all_devices(&self) -> Result<Vec<OwnedObjectPath>> {
        Ok(self.state().devices.iter().map(|d| d.path.clone()).collect())
    }

    async fn device_type(&self, device: &OwnedObjectPath) -> Result<DeviceType> {
        self.state()
            .devices
            .iter()
            .find(|d| &d.path == device)
            .map(|d| d.kind)
            .ok_or_else(|| failure("DeviceType"))
    }

    async fn device_state(&self, device: &OwnedObjectPath) -> Result<DeviceState> {
        let mut st = self.state();
        st.state_reads += 1;
        let dev = st
            .devices
            .iter_mut()
            .find(|d| &d.path == device)
            .ok_or_else(|| failure("State"))?;
        if dev.on_activate.len() > 1 {
            if let Some(next) = dev.on_activate.pop_front() {
                dev.state = next;
            }
        } else if let Some(last) = dev.on_activate.front() {
            dev.state = *last;
        }
        Ok(dev.state)
    }

    async fn activate_connection(
        &self,
        connection: &OwnedObjectPath,
        device: &OwnedObjectPath,
    ) -> Result<OwnedObjectPath> {
        let mut st = self.state();
        st.activations.push((connection.clone(), device.clone()));
        Ok(path("/org/freedesktop/NetworkManager/ActiveConnection/1"))
    }

    async fn access_points(&self, device: &OwnedObjectPath) -> Result<Vec<AccessPoint>> {
        self.state()
            .devices
            .iter()
            .find(|d| &d.path == device)
            .map(|d| d.access_points.clone())
            .ok_or_else(|| failure("GetAccessPoints"))
    }

    async fn active_access_point(&self, device: &OwnedObjectPath) -> Result<Option<AccessPoint>> {
        self.state()
            .devices
            .iter()
            .find(|d| &d.path == device)
            .map(|d| d.active_ap.clone())
            .ok_or_else(|| failure("ActiveAccessPoint"))
    }
}
