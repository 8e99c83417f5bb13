use std::time::Duration;
use wifi_connect::{Config, WifiConnect};

#[tokio::main(flavor = "current_thread")]
async fn main() -> wifi_connect::Result<()> {
    let wifi = WifiConnect::new(Config::from_env()).await?;

    if wifi.have_active_internet_connection().await {
        println!("Already online, not starting the hotspot");
        return Ok(());
    }

    if !wifi.start_hotspot().await {
        eprintln!("Hotspot {} did not come up", wifi.hotspot_ssid());
        return Ok(());
    }
    println!("Hotspot {} is up for 60 seconds", wifi.hotspot_ssid());

    tokio::time::sleep(Duration::from_secs(60)).await;
    wifi.stop_hotspot().await;

    Ok(())
}
