use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use titan::adapter::inbound::cli::{self, command::Cli};
use titan::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "titan starting");

    tokio::select! {
        result = cli::execute(&cli, &config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                cli::output::error(&e.to_string());
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            warn!("Interrupted, submitted transactions may still be mined");
            std::process::exit(130);
        }
    }

    info!("titan stopped");
}
