use std::env;

use chrono::Duration;
use log::*;
use swapshop_engine::cache::CacheConfig;

const DEFAULT_SWAPSHOP_HOST: &str = "127.0.0.1";
const DEFAULT_SWAPSHOP_PORT: u16 = 8360;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/swapshop.db";
const DEFAULT_TOKEN_EXPIRY: Duration = Duration::hours(24);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// How long a bearer token issued by the auth endpoints remains valid.
    pub token_expiry: Duration,
    /// Configuration for the order cache. Handed to the engine as-is.
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SWAPSHOP_HOST.to_string(),
            port: DEFAULT_SWAPSHOP_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            token_expiry: DEFAULT_TOKEN_EXPIRY,
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SWAPSHOP_HOST").ok().unwrap_or_else(|| DEFAULT_SWAPSHOP_HOST.into());
        let port = env::var("SWAPSHOP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SWAPSHOP_PORT. {e} Using the default, \
                         {DEFAULT_SWAPSHOP_PORT}, instead."
                    );
                    DEFAULT_SWAPSHOP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SWAPSHOP_PORT);
        let database_url = env::var("SWAPSHOP_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ SWAPSHOP_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}, instead.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let token_expiry = configure_token_expiry();
        let cache = CacheConfig::from_env_or_default();
        Self { host, port, database_url, token_expiry, cache }
    }
}

fn configure_token_expiry() -> Duration {
    env::var("SWAPSHOP_TOKEN_EXPIRY_HOURS")
        .map_err(|_| {
            info!(
                "🪛️ SWAPSHOP_TOKEN_EXPIRY_HOURS is not set. Using the default value of {} hrs.",
                DEFAULT_TOKEN_EXPIRY.num_hours()
            )
        })
        .and_then(|s| {
            s.parse::<i64>()
                .map(Duration::hours)
                .map_err(|e| warn!("🪛️ Invalid configuration value for SWAPSHOP_TOKEN_EXPIRY_HOURS. {e}"))
        })
        .ok()
        .unwrap_or(DEFAULT_TOKEN_EXPIRY)
}
