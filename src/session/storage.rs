use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Key/value storage scoped to one browser tab.
pub trait SessionStorage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-memory tab storage. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map only means a writer panicked mid-insert; the map itself is intact.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        self.entries().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

struct Tab {
    storage: MemoryStorage,
    last_seen: Instant,
}

/// Open tabs by tab id. Dropping a tab drops its storage, which is what closing
/// a browser tab does to `sessionStorage`.
#[derive(Clone, Default)]
pub struct TabRegistry {
    tabs: Arc<tokio::sync::Mutex<HashMap<String, Tab>>>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self) -> (String, MemoryStorage) {
        let tab_id = Uuid::new_v4().to_string();
        let storage = MemoryStorage::new();

        self.tabs.lock().await.insert(
            tab_id.clone(),
            Tab {
                storage: storage.clone(),
                last_seen: Instant::now(),
            },
        );

        tracing::debug!(tab_id = %tab_id, "tab opened");
        (tab_id, storage)
    }

    /// Storage of an open tab, refreshing its idle timer.
    pub async fn resume(&self, tab_id: &str) -> Option<MemoryStorage> {
        let mut tabs = self.tabs.lock().await;
        let tab = tabs.get_mut(tab_id)?;
        tab.last_seen = Instant::now();
        Some(tab.storage.clone())
    }

    /// Returns whether the tab was open.
    pub async fn close(&self, tab_id: &str) -> bool {
        let closed = self.tabs.lock().await.remove(tab_id).is_some();
        if closed {
            tracing::debug!(tab_id = %tab_id, "tab closed");
        }
        closed
    }

    /// Drop tabs idle for longer than `idle`. Returns how many were dropped.
    pub async fn cleanup(&self, idle: Duration) -> usize {
        let mut tabs = self.tabs.lock().await;
        let now = Instant::now();
        let before = tabs.len();
        tabs.retain(|_, tab| now.duration_since(tab.last_seen) <= idle);
        before - tabs.len()
    }

    pub async fn len(&self) -> usize {
        self.tabs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.write("k", "v".to_string());
        assert_eq!(other.read("k").as_deref(), Some("v"));

        other.remove("k");
        assert_eq!(storage.read("k"), None);
        // removing twice is fine
        other.remove("k");
    }

    #[tokio::test]
    async fn test_resume_returns_same_storage() {
        let tabs = TabRegistry::new();
        let (tab_id, storage) = tabs.open().await;
        storage.write("k", "v".to_string());

        let resumed = tabs.resume(&tab_id).await.unwrap();
        assert_eq!(resumed.read("k").as_deref(), Some("v"));
        assert!(tabs.resume("unknown").await.is_none());
    }

    #[tokio::test]
    async fn test_close_drops_storage() {
        let tabs = TabRegistry::new();
        let (tab_id, _) = tabs.open().await;

        assert!(tabs.close(&tab_id).await);
        assert!(!tabs.close(&tab_id).await);
        assert!(tabs.resume(&tab_id).await.is_none());
        assert!(tabs.is_empty().await);
    }

    #[tokio::test]
    async fn test_cleanup_evicts_idle_tabs() {
        let tabs = TabRegistry::new();
        tabs.open().await;
        tabs.open().await;

        assert_eq!(tabs.cleanup(Duration::from_secs(60)).await, 0);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(tabs.cleanup(Duration::from_millis(5)).await, 2);
        assert!(tabs.is_empty().await);
    }
}
