// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory TTL session store.
//!
//! Expiry is lazy: an expired entry is evicted the next time it is read or
//! overwritten. Each `put` resets the TTL of that key only, so related keys
//! written at different times expire independently.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use opsdesk_core::{
    AdapterType, HealthStatus, OpsdeskError, PluginAdapter, SessionStore,
};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory [`SessionStore`] keyed by composite string keys.
///
/// Uses `tokio::time::Instant` so tests can pause and advance the clock
/// deterministically.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries. Expired entries still pending
    /// lazy eviction are not counted.
    pub async fn live_len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries.values().filter(|e| e.expires_at > now).count()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), OpsdeskError> {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, OpsdeskError> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                debug!(key, "evicting expired session key");
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), OpsdeskError> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for MemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Session
    }

    async fn health_check(&self) -> Result<HealthStatus, OpsdeskError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), OpsdeskError> {
        let mut entries = self.entries.lock().await;
        entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn put_then_get_returns_value() {
        let store = MemorySessionStore::new();
        store.put("step:1", "awaiting_title", TTL).await.unwrap();
        assert_eq!(
            store.get("step:1").await.unwrap().as_deref(),
            Some("awaiting_title")
        );
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let store = MemorySessionStore::new();
        assert!(store.get("step:404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing_value() {
        let store = MemorySessionStore::new();
        store.put("task:1:title", "first", TTL).await.unwrap();
        store.put("task:1:title", "second", TTL).await.unwrap();
        assert_eq!(
            store.get("task:1:title").await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemorySessionStore::new();
        store.put("step:1", "awaiting_title", TTL).await.unwrap();
        store.delete("step:1").await.unwrap();
        store.delete("step:1").await.unwrap();
        assert!(store.get("step:1").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn key_expires_after_ttl_elapses() {
        let store = MemorySessionStore::new();
        store.put("step:1", "awaiting_title", TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(store.get("step:1").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("step:1").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn put_resets_ttl_for_that_key_only() {
        let store = MemorySessionStore::new();
        store.put("task:1:title", "Fix bug", TTL).await.unwrap();
        store.put("task:1:category", "dev", TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(200)).await;
        // Refresh only the title key.
        store.put("task:1:title", "Fix bug", TTL).await.unwrap();

        tokio::time::advance(Duration::from_secs(150)).await;
        assert!(store.get("task:1:title").await.unwrap().is_some());
        assert!(store.get("task:1:category").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn live_len_ignores_expired_entries() {
        let store = MemorySessionStore::new();
        store.put("a", "1", Duration::from_secs(10)).await.unwrap();
        store.put("b", "2", Duration::from_secs(100)).await.unwrap();

        tokio::time::advance(Duration::from_secs(50)).await;
        assert_eq!(store.live_len().await, 1);
    }

    #[tokio::test]
    async fn shutdown_clears_all_entries() {
        let store = MemorySessionStore::new();
        store.put("step:1", "awaiting_title", TTL).await.unwrap();
        store.shutdown().await.unwrap();
        assert!(store.get("step:1").await.unwrap().is_none());
    }
}
