use clap::Parser;
use dotenvy::dotenv;
use log::*;

mod client;
mod config;
mod sweep;

use client::{ShopApiClient, WebhookNotifier};
use config::PollerConfig;
use sweep::{poll_loop, run_sweep};

/// Sweeps the shop's pending orders and notifies the dispatch webhook about each one.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Run a single sweep and exit instead of polling continuously.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Args::parse();
    let config = PollerConfig::from_env_or_default();
    info!("📡 Dispatch poller starting. API at {}, webhook at {}", config.api_url, config.webhook_url);
    let api = ShopApiClient::new(config.api_url);
    let webhook = WebhookNotifier::new(config.webhook_url);
    if args.once {
        match run_sweep(&api, &webhook).await {
            Ok(stats) => info!("📡 Sweep complete. {stats}"),
            Err(e) => {
                error!("📡 Sweep failed: {e}");
                std::process::exit(1);
            },
        }
        return;
    }
    poll_loop(api, webhook, config.poll_interval).await;
    info!("📡 Bye!");
}
