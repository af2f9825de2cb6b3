use anyhow::Result;
use clap::Parser;
use qchess_tui::cli::Cli;
use qchess_tui::client::EngineClient;
use qchess_tui::tui::{self, PlayerSlot};
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log = std::fs::File::create(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::sync::Arc::new(log))
        .with_ansi(false)
        .init();

    let client = EngineClient::new(&cli.server);
    let white = PlayerSlot::new(1, cli.white);
    let black = PlayerSlot::new(2, cli.black);
    tui::run(
        client,
        white,
        black,
        Duration::from_millis(cli.pace_ms),
        cli.ascii,
        cli.load,
    )
    .await
}
