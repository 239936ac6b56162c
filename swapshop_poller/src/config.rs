use std::{env, time::Duration};

use log::*;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8360";
pub const DEFAULT_WEBHOOK_URL: &str = "http://127.0.0.1:8370/webhooks/order-ready";
pub const DEFAULT_POLL_INTERVAL_SECONDS: u64 = 5;

/// Where the poller finds the shop API, where it delivers notifications, and how often it sweeps.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub api_url: Url,
    pub webhook_url: Url,
    pub poll_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("The default API url must parse"),
            webhook_url: Url::parse(DEFAULT_WEBHOOK_URL).expect("The default webhook url must parse"),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECONDS),
        }
    }
}

impl PollerConfig {
    pub fn from_env_or_default() -> Self {
        let api_url = url_from_env("SWAPSHOP_API_URL", DEFAULT_API_URL);
        let webhook_url = url_from_env("SWAPSHOP_WEBHOOK_URL", DEFAULT_WEBHOOK_URL);
        let secs = env::var("SWAPSHOP_POLL_INTERVAL_SECONDS")
            .map_err(|_| {
                info!(
                    "📡 SWAPSHOP_POLL_INTERVAL_SECONDS is not set. Using the default of \
                     {DEFAULT_POLL_INTERVAL_SECONDS}s."
                )
            })
            .and_then(|s| {
                s.parse::<u64>().map_err(|e| warn!("📡 {s} is not a valid poll interval. {e}. Using the default."))
            })
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECONDS);
        let poll_interval = if secs == 0 {
            warn!("📡 The poll interval cannot be zero. Using the default of {DEFAULT_POLL_INTERVAL_SECONDS}s.");
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECONDS)
        } else {
            Duration::from_secs(secs)
        };
        Self { api_url, webhook_url, poll_interval }
    }
}

fn url_from_env(name: &str, default: &str) -> Url {
    let raw = env::var(name).unwrap_or_else(|_| {
        info!("📡 {name} is not set. Using the default of {default}.");
        default.to_string()
    });
    Url::parse(&raw).unwrap_or_else(|e| {
        warn!("📡 {raw} is not a valid URL ({e}). Using the default of {default}.");
        Url::parse(default).expect("The default url must parse")
    })
}
