//! Key-value cache collaborator used by the resolution cache.
//!
//! The trait mirrors a networked cache (`GET` / `SET ... EX`). `MemoryKvCache` is an
//! in-process implementation with lazy TTL expiry.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::{sync::RwLock, time::Instant};

use crate::database::StoreError;

#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Returns `None` when the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError>;
}

/// A cached payload with its expiry instant
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe in-memory cache with per-entry expiry.
#[derive(Clone, Default)]
pub struct MemoryKvCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryKvCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every expired entry.
    pub async fn cleanup_expired(&self) {
        let now = Instant::now();
        self.entries.write().await.retain(|_, entry| !entry.is_expired(now));
    }
}

#[async_trait]
impl KeyValueCache for MemoryKvCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let entries = self.entries.read().await;
        let now = Instant::now();
        Ok(entries.get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CacheEntry { value, expires_at: Instant::now() + ttl });

        // Periodically clean up expired entries
        if entries.len() % 256 == 0 {
            let now = Instant::now();
            entries.retain(|_, entry| !entry.is_expired(now));
        }
        Ok(())
    }
}
