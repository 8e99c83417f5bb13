mod common;

use common::{ETHERNET, FakeBackend, FakeDevice, WIRELESS, test_config, wifi};
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, Once};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wifi_connect::builders::{ConnectionBuilder, build_profile};
use wifi_connect::{Config, ConnectionMode, DeviceState, DeviceType, WifiConnect};

struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

fn capture_logs() {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

fn logged(needle: &str) -> bool {
    CAPTURE
        .lines
        .lock()
        .unwrap()
        .iter()
        .any(|l| l.contains(needle))
}

fn password_profile(name: &str) -> wifi_connect::builders::ConnectionProfile {
    build_profile(
        Some(ConnectionMode::Password),
        name,
        Some("CafeNet"),
        None,
        Some("hunter22"),
    )
    .unwrap()
}

#[tokio::test]
async fn already_active_device_with_no_wait_succeeds() {
    let backend = FakeBackend::new().with_device(
        FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3")
            .with_state(DeviceState::Activated),
    );
    let wifi = wifi(backend);

    assert!(wifi.activate(password_profile("wifi-connect"), "wifi-connect", 0).await);

    let st = wifi.backend().state();
    assert_eq!(st.activations.len(), 1);
    assert_eq!(st.state_reads, 1);
}

#[tokio::test]
async fn device_that_never_activates_times_out_after_every_poll() {
    capture_logs();
    let backend = FakeBackend::new().with_device(
        FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3")
            .activates_to(&[DeviceState::Prepare, DeviceState::NeedAuth]),
    );
    let wifi = wifi(backend);

    assert!(!wifi.activate(password_profile("stuck"), "stuck", 5).await);

    assert_eq!(wifi.backend().state().state_reads, 6);
    assert!(logged("Connection stuck failed"));
}

#[tokio::test]
async fn every_poll_waits_the_interval() {
    let backend = FakeBackend::new().with_device(
        FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3")
            .activates_to(&[DeviceState::Prepare]),
    );
    let config = Config {
        poll_interval: Duration::from_millis(20),
        ..test_config()
    };
    let wifi = WifiConnect::with_backend(backend, config);

    let start = Instant::now();
    assert!(!wifi.activate(password_profile("slow"), "slow", 5).await);

    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(wifi.backend().state().state_reads, 6);
}

#[tokio::test]
async fn activation_stops_polling_once_active() {
    let backend = FakeBackend::new().with_device(
        FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3").activates_to(&[
            DeviceState::Prepare,
            DeviceState::Config,
            DeviceState::IpConfig,
            DeviceState::Activated,
        ]),
    );
    let wifi = wifi(backend);

    assert!(wifi.activate(password_profile("wifi-connect"), "wifi-connect", 30).await);
    assert_eq!(wifi.backend().state().state_reads, 4);
}

#[tokio::test]
async fn no_matching_device_fails_without_activation() {
    capture_logs();
    let backend = FakeBackend::new().with_device(FakeDevice::new(
        "/org/freedesktop/NetworkManager/Devices/2",
        DeviceType::Ethernet,
    ));
    let wifi = wifi(backend);

    assert!(!wifi.activate(password_profile("nodevice"), "nodevice", 30).await);

    let st = wifi.backend().state();
    assert!(st.activations.is_empty());
    assert_eq!(st.added.len(), 1);
    drop(st);
    assert!(logged("no suitable device found"));
}

#[tokio::test]
async fn unknown_connection_type_has_no_device() {
    let backend = FakeBackend::new()
        .with_device(FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3"));
    let wifi = wifi(backend);
    let profile = ConnectionBuilder::new("vpn", "tunnel").build();

    assert!(!wifi.activate(profile, "tunnel", 30).await);
    assert!(wifi.backend().state().activations.is_empty());
}

#[tokio::test]
async fn ethernet_profile_uses_ethernet_device() {
    let backend = FakeBackend::new()
        .with_device(FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3"))
        .with_device(
            FakeDevice::new("/org/freedesktop/NetworkManager/Devices/2", DeviceType::Ethernet)
                .with_state(DeviceState::Activated),
        );
    let wifi = wifi(backend);
    let profile = ConnectionBuilder::new(ETHERNET, "wired").ipv4_auto().build();

    assert!(wifi.activate(profile, "wired", 0).await);

    let st = wifi.backend().state();
    assert_eq!(
        st.activations[0].1.as_str(),
        "/org/freedesktop/NetworkManager/Devices/2"
    );
}

#[tokio::test]
async fn rejected_registration_is_reported_as_failure() {
    let backend = FakeBackend::new()
        .with_device(FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3"))
        .failing_add();
    let wifi = wifi(backend);

    assert!(!wifi.activate(password_profile("wifi-connect"), "wifi-connect", 30).await);
    assert!(wifi.backend().state().activations.is_empty());
}

#[tokio::test]
async fn stale_profiles_with_the_same_name_are_replaced() {
    let backend = FakeBackend::new()
        .with_device(
            FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3")
                .with_state(DeviceState::Activated),
        )
        .with_connection("wifi-connect", WIRELESS)
        .with_connection("wifi-connect", WIRELESS)
        .with_connection("Wired connection 1", ETHERNET);
    let wifi = wifi(backend);

    assert!(wifi.activate(password_profile("wifi-connect"), "wifi-connect", 0).await);

    let st = wifi.backend().state();
    assert_eq!(st.deletes.len(), 2);
    let names: Vec<_> = st.connections.iter().map(|(_, s)| s.id.as_str()).collect();
    assert_eq!(names, ["Wired connection 1", "wifi-connect"]);

    let (conn, _) = &st.activations[0];
    let (newest, _) = st.connections.last().unwrap();
    assert_eq!(conn, newest);
}

#[tokio::test]
async fn connect_builds_and_activates() {
    let backend = FakeBackend::new().with_device(
        FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3")
            .activates_to(&[DeviceState::Config, DeviceState::Activated]),
    );
    let wifi = wifi(backend);

    assert!(
        wifi.connect(
            Some(ConnectionMode::Enterprise),
            "wifi-connect",
            Some("Campus"),
            Some("alice"),
            Some("secret"),
        )
        .await
    );

    let st = wifi.backend().state();
    assert_eq!(st.added.len(), 1);
    assert_eq!(st.added[0].id, "wifi-connect");
    assert_eq!(st.added[0].connection_type, WIRELESS);
    assert!(st.added[0].uuid.is_some());
}

#[tokio::test]
async fn connect_with_missing_arguments_makes_no_calls() {
    let backend = FakeBackend::new()
        .with_device(FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3"));
    let wifi = wifi(backend);

    assert!(!wifi.connect(None, "wifi-connect", Some("CafeNet"), None, None).await);
    assert!(
        !wifi
            .connect(Some(ConnectionMode::Open), "wifi-connect", None, None, None)
            .await
    );
    assert!(
        !wifi
            .connect(Some(ConnectionMode::Password), "wifi-connect", Some("CafeNet"), None, None)
            .await
    );

    let st = wifi.backend().state();
    assert!(st.added.is_empty());
    assert!(st.activations.is_empty());
}

#[tokio::test]
async fn cancelled_wait_reports_failure() {
    let backend = FakeBackend::new().with_device(
        FakeDevice::wifi("/org/freedesktop/NetworkManager/Devices/3")
            .activates_to(&[DeviceState::Prepare]),
    );
    let wifi = wifi(backend);
    let token = CancellationToken::new();
    token.cancel();

    assert!(
        !wifi
            .activate_with_cancel(password_profile("wifi-connect"), "wifi-connect", 30, &token)
            .await
    );
    assert_eq!(wifi.backend().state().state_reads, 1);
}
