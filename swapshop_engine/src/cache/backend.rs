use std::{
    fmt,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use log::*;
use redis::{aio::ConnectionManager, AsyncCommands, Client};

/// A cached value with its expiry bookkeeping.
#[derive(Clone, Debug)]
pub struct CachedEntry {
    value: String,
    stored_at: Instant,
    ttl: Duration,
}

impl CachedEntry {
    fn new(value: String, ttl: Duration) -> Self {
        Self { value, stored_at: Instant::now(), ttl }
    }

    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// The storage behind [`OrderCache`](crate::cache::OrderCache).
///
/// Every backend failure is absorbed here: a read that goes wrong is a miss, a write or delete that goes wrong is
/// a no-op. Callers cannot tell absence, expiry and unavailability apart, which is exactly the contract the order
/// flow relies on.
#[derive(Clone)]
pub enum CacheBackend {
    /// Caching is switched off. Reads always miss and writes go nowhere.
    Disabled,
    /// In-process map with per-entry expiry.
    Memory(Arc<DashMap<String, CachedEntry>>),
    /// A shared redis instance. The connection manager reconnects on its own after a dropout.
    Redis(ConnectionManager),
}

impl Debug for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheBackend::Disabled => write!(f, "CacheBackend::Disabled"),
            CacheBackend::Memory(map) => write!(f, "CacheBackend::Memory({} entries)", map.len()),
            CacheBackend::Redis(_) => write!(f, "CacheBackend::Redis"),
        }
    }
}

impl CacheBackend {
    pub fn memory() -> Self {
        CacheBackend::Memory(Arc::new(DashMap::new()))
    }

    /// Connects to redis, failing if the server cannot be reached right now.
    pub async fn connect_redis(url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(url)?;
        let manager = client.get_connection_manager().await?;
        Ok(CacheBackend::Redis(manager))
    }

    pub(crate) async fn get(&self, key: &str) -> Option<String> {
        match self {
            CacheBackend::Disabled => None,
            CacheBackend::Memory(map) => match map.get(key) {
                Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
                Some(entry) => {
                    drop(entry);
                    map.remove(key);
                    None
                },
                None => None,
            },
            CacheBackend::Redis(manager) => {
                let mut conn = manager.clone();
                match conn.get::<_, Option<String>>(key).await {
                    Ok(value) => value,
                    Err(e) => {
                        warn!("🧰️ Cache read for {key} failed and is treated as a miss. {e}");
                        None
                    },
                }
            },
        }
    }

    pub(crate) async fn set(&self, key: &str, value: String, ttl: Duration) {
        match self {
            CacheBackend::Disabled => {},
            CacheBackend::Memory(map) => {
                map.insert(key.to_string(), CachedEntry::new(value, ttl));
            },
            CacheBackend::Redis(manager) => {
                let mut conn = manager.clone();
                // SETEX rejects a zero expiry
                let ttl_secs = ttl.as_secs().max(1);
                if let Err(e) = conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
                    warn!("🧰️ Cache write for {key} failed and is skipped. {e}");
                }
            },
        }
    }

    pub(crate) async fn delete(&self, key: &str) {
        match self {
            CacheBackend::Disabled => {},
            CacheBackend::Memory(map) => {
                map.remove(key);
            },
            CacheBackend::Redis(manager) => {
                let mut conn = manager.clone();
                if let Err(e) = conn.del::<_, ()>(key).await {
                    warn!("🧰️ Cache invalidation for {key} failed and is skipped. {e}");
                }
            },
        }
    }
}
