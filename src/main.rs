use anyhow::Result;
use clap::Parser;
use shopdesk::api::HttpCatalogClient;
use shopdesk::app::App;
use shopdesk::cli::{Cli, CliHandler};
use shopdesk::config::AppConfig;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let headless = cli.command.is_some();

    // The panel owns the terminal, so it logs to a file instead of stderr
    if headless {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(cli.debug))
            .init();
    } else {
        let log_dir = AppConfig::data_dir();
        std::fs::create_dir_all(&log_dir)?;
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("shopdesk.log"))?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_ansi(false)
            .with_env_filter(env_filter(cli.debug))
            .init();
    }

    if cli.debug {
        tracing::info!("🐛 Debug mode enabled - verbose logging active");
    }

    let mut config = AppConfig::load(cli.config_dir.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    let client = Arc::new(HttpCatalogClient::new(
        &config.api_base_url,
        config.request_timeout(),
    )?);
    tracing::info!("Using catalog API at {}", client.base_url());

    // Handle CLI commands
    if let Some(command) = cli.command {
        let handler = CliHandler::new(config, client);
        return handler.handle_command(command, &mut std::io::stdout()).await;
    }

    let mut app = App::new(&config, client);
    app.run().await
}

/// `--debug` wins, then `RUST_LOG`, then `info`
fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}
