use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::process::ExitCode;

use wifi_connect::logging::FileLogger;
use wifi_connect::{Config, ConnectionMode, WifiConnect};

#[derive(Parser, Debug)]
#[command(name = "wifi-connect")]
#[command(version, about = "Configure Wi-Fi through NetworkManager")]
struct Args {
    /// Log more detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List visible networks
    Scan {
        /// Leave out the hidden-network placeholder
        #[arg(long)]
        no_hidden: bool,
        /// Print JSON for the portal UI
        #[arg(long)]
        json: bool,
    },
    /// Start or stop the local hotspot
    Hotspot {
        #[command(subcommand)]
        action: HotspotAction,
    },
    /// Connect to a network
    Connect {
        /// hotspot, none, password or enterprise
        #[arg(long)]
        mode: ConnectionMode,
        #[arg(long)]
        ssid: String,
        /// Connection name; defaults to the generic connection name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Number of one-second polls to wait for activation
        #[arg(long)]
        wait: Option<u32>,
    },
    /// Delete a saved connection by name
    Forget { name: String },
    /// Delete every saved Wi-Fi connection
    Reset,
    /// List saved connections
    Connections,
    /// Check internet reachability
    Online,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum HotspotAction {
    Start,
    Stop,
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = Config::from_env();

    match FileLogger::open(&config.log, level(args.verbose)) {
        Ok(logger) => {
            if let Err(e) = logger.install() {
                eprintln!("Logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("Logging disabled: {e}"),
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(execute(args.command, config))
}

async fn execute(command: Option<Command>, config: Config) -> anyhow::Result<ExitCode> {
    let wifi = WifiConnect::new(config)
        .await
        .context("failed to reach NetworkManager")?;

    let Some(command) = command else {
        match wifi.active_access_point().await? {
            Some(ap) => println!(" * Active access point : {} ({})", ap.ssid, ap.security),
            None => println!(" * No active access point"),
        }
        return Ok(ExitCode::SUCCESS);
    };

    let code = match command {
        Command::Scan { no_hidden, json } => {
            let aps = wifi.list_access_points(!no_hidden).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&aps)?);
            } else {
                for ap in &aps {
                    println!("{:32} {}", ap.ssid, ap.security);
                }
            }
            ExitCode::SUCCESS
        }
        Command::Hotspot { action } => status(match action {
            HotspotAction::Start => wifi.start_hotspot().await,
            HotspotAction::Stop => wifi.stop_hotspot().await,
        }),
        Command::Connect {
            mode,
            ssid,
            name,
            username,
            password,
            wait,
        } => {
            let name = name.unwrap_or_else(|| wifi.config().generic_connection_name.clone());
            let ok = match wait {
                Some(max_wait) => {
                    let profile = wifi.profile_builder().build(
                        Some(mode),
                        &name,
                        Some(&ssid),
                        username.as_deref(),
                        password.as_deref(),
                    )?;
                    wifi.activate(profile, &name, max_wait).await
                }
                None => {
                    wifi.connect(
                        Some(mode),
                        &name,
                        Some(&ssid),
                        username.as_deref(),
                        password.as_deref(),
                    )
                    .await
                }
            };
            status(ok)
        }
        Command::Forget { name } => status(wifi.delete_connection(&name).await),
        Command::Reset => status(wifi.delete_all_wireless_connections().await),
        Command::Connections => {
            for conn in wifi.list_connections().await? {
                println!("{:32} {}", conn.name, conn.handle.as_str());
            }
            ExitCode::SUCCESS
        }
        Command::Online => {
            let online = wifi.have_active_internet_connection().await;
            println!("{}", if online { "online" } else { "offline" });
            status(online)
        }
    };

    log::logger().flush();
    Ok(code)
}
