use std::env;

use log::*;

pub const DEFAULT_RECEIVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_RECEIVER_PORT: u16 = 8370;

#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self { host: DEFAULT_RECEIVER_HOST.to_string(), port: DEFAULT_RECEIVER_PORT }
    }
}

impl ReceiverConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("SWAPSHOP_RECEIVER_HOST").unwrap_or_else(|_| {
            info!("📨 SWAPSHOP_RECEIVER_HOST is not set. Using the default of {DEFAULT_RECEIVER_HOST}.");
            DEFAULT_RECEIVER_HOST.to_string()
        });
        let port = env::var("SWAPSHOP_RECEIVER_PORT")
            .map_err(|_| {
                info!("📨 SWAPSHOP_RECEIVER_PORT is not set. Using the default of {DEFAULT_RECEIVER_PORT}.")
            })
            .and_then(|p| {
                p.parse::<u16>().map_err(|e| error!("📨 {p} is not a valid port. {e}. Using the default."))
            })
            .unwrap_or(DEFAULT_RECEIVER_PORT);
        Self { host, port }
    }
}
