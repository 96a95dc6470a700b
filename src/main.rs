use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use wellness::cli::{commands::Cli, run_cli};
use wellness::config::AppConfig;
use wellness::gateway::{HttpGateway, RemoteGateway};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let gateway: Arc<dyn RemoteGateway> = match HttpGateway::new(&config.services, &config.http) {
        Ok(g) => Arc::new(g),
        Err(e) => {
            error!("Failed to initialize HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    info!("Using messaging service at {}", config.services.messaging_base_url);

    if let Err(e) = run_cli(cli.command, &config, gateway).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
