use wifi_connect::{Config, WifiConnect};

#[tokio::main(flavor = "current_thread")]
async fn main() -> wifi_connect::Result<()> {
    let wifi = WifiConnect::new(Config::from_env()).await?;

    println!("Scanning for WiFi networks...");
    for ap in wifi.list_access_points(true).await? {
        println!("{:32} {}", ap.ssid, ap.security);
    }

    Ok(())
}
