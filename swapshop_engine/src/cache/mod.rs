//! # The TTL-bounded side cache in front of the order store.
//!
//! The cache holds JSON snapshots of store reads, keyed by order id (`order:{id}`) or by a fixed list-view name
//! (`orders:pending`, `orders:processed`). It is never authoritative. Entries expire after the configured TTL and
//! every failure mode of the backend collapses into "absent": callers of [`OrderCache`] cannot distinguish an
//! explicit miss from an expired entry or an unreachable backend, and no cache operation can fail upward.
mod backend;

use std::{env, time::Duration};

use log::*;
use serde::{de::DeserializeOwned, Serialize};

pub use backend::{CacheBackend, CachedEntry};
use crate::db_types::{OrderId, OrderStatus};

pub const PENDING_ORDERS_KEY: &str = "orders:pending";
pub const PROCESSED_ORDERS_KEY: &str = "orders:processed";

pub fn order_key(id: &OrderId) -> String {
    format!("order:{}", id.as_str())
}

pub fn status_key(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => PENDING_ORDERS_KEY,
        OrderStatus::Processed => PROCESSED_ORDERS_KEY,
    }
}

const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Where the cache lives and how long its entries stay fresh.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub redis_url: Option<String>,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { redis_url: None, ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS) }
    }
}

impl CacheConfig {
    pub fn from_env_or_default() -> Self {
        let redis_url = env::var("SWAPSHOP_REDIS_URL").ok();
        if redis_url.is_none() {
            info!("🧰️ SWAPSHOP_REDIS_URL is not set. The in-process cache will be used.");
        }
        let ttl = env::var("SWAPSHOP_CACHE_TTL_SECONDS")
            .map(|s| {
                s.parse::<u64>().unwrap_or_else(|e| {
                    error!("🧰️ {s} is not a valid cache TTL ({e}). Using the default, {DEFAULT_CACHE_TTL_SECS}s.");
                    DEFAULT_CACHE_TTL_SECS
                })
            })
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        Self { redis_url, ttl: Duration::from_secs(ttl) }
    }
}

/// The cache layer handle shared by the order flow.
///
/// `OrderCache` is cheap to clone; clones share the same backend.
#[derive(Clone, Debug)]
pub struct OrderCache {
    backend: CacheBackend,
    ttl: Duration,
}

impl OrderCache {
    pub fn new(backend: CacheBackend, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// A cache that is switched off entirely. Every read misses and every write is a no-op, which leaves the
    /// order flow fully functional against the store alone.
    pub fn disabled() -> Self {
        Self::new(CacheBackend::Disabled, Duration::ZERO)
    }

    pub fn in_memory(ttl: Duration) -> Self {
        Self::new(CacheBackend::memory(), ttl)
    }

    /// Builds the cache described by `config`. A configured redis that cannot be reached at startup disables
    /// caching for the lifetime of the process; without a redis URL the in-process backend is used.
    pub async fn connect(config: &CacheConfig) -> Self {
        match config.redis_url.as_deref() {
            Some(url) => match CacheBackend::connect_redis(url).await {
                Ok(backend) => {
                    info!("🧰️ Connected to redis. Cache TTL is {}s.", config.ttl.as_secs());
                    Self::new(backend, config.ttl)
                },
                Err(e) => {
                    warn!("🧰️ Redis is unreachable, so caching is disabled. {e}");
                    Self::disabled()
                },
            },
            None => Self::new(CacheBackend::memory(), config.ttl),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.backend, CacheBackend::Disabled)
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.backend.get(key).await
    }

    pub async fn set(&self, key: &str, value: String) {
        self.backend.set(key, value, self.ttl).await
    }

    pub async fn delete(&self, key: &str) {
        self.backend.delete(key).await
    }

    /// Fetches and decodes a cached snapshot. An entry that does not decode is dropped and treated as a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("🧰️ The cached entry for {key} cannot be decoded and will be dropped. {e}");
                self.backend.delete(key).await;
                None
            },
        }
    }

    /// Stores a JSON snapshot of a store read. A value that cannot be serialized is simply not cached.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.set(key, raw, self.ttl).await,
            Err(e) => warn!("🧰️ The value for {key} cannot be serialized and will not be cached. {e}"),
        }
    }
}
