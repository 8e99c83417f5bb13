use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    wifi_connect_cli::run()
}
