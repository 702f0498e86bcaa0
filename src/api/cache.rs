//! Tag-based query cache.
//!
//! Queries store their reply under the request path together with the tags
//! they provide. Mutations invalidate by tag. Entries are stamped with the
//! session epoch so nothing fetched under one session is served to the next.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// Label tying cached queries to the mutations that make them stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Contact,
    Extra,
    Team,
}

#[derive(Debug)]
struct CacheEntry {
    epoch: u64,
    tags: Vec<CacheTag>,
    body: serde_json::Value,
}

#[derive(Debug, Default)]
pub struct TagCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl TagCache {
    /// Cached body for `key`, if stored under the same session epoch.
    pub async fn get(&self, key: &str, epoch: u64) -> Option<serde_json::Value> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.epoch == epoch)
            .map(|entry| entry.body.clone())
    }

    pub async fn insert(&self, key: &str, epoch: u64, tags: &[CacheTag], body: serde_json::Value) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CacheEntry {
                epoch,
                tags: tags.to_vec(),
                body,
            },
        );
    }

    /// Drop every entry carrying one of `tags`. Returns how many were dropped.
    pub async fn invalidate(&self, tags: &[CacheTag]) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.tags.iter().any(|t| tags.contains(t)));
        before - entries.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_invalidate_only_matching_tags() {
        let cache = TagCache::default();
        cache.insert("/extra-service", 0, &[CacheTag::Extra], json!([1])).await;
        cache.insert("/team", 0, &[CacheTag::Team], json!([2])).await;

        let dropped = cache.invalidate(&[CacheTag::Extra]).await;

        assert_eq!(dropped, 1);
        assert!(cache.get("/extra-service", 0).await.is_none());
        assert_eq!(cache.get("/team", 0).await, Some(json!([2])));
    }

    #[tokio::test]
    async fn test_entries_from_other_epoch_are_stale() {
        let cache = TagCache::default();
        cache.insert("/team", 3, &[CacheTag::Team], json!([])).await;

        assert!(cache.get("/team", 3).await.is_some());
        assert!(cache.get("/team", 4).await.is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = TagCache::default();
        cache.insert("/contact?page=1&limit=10", 0, &[CacheTag::Contact], json!({})).await;
        cache.clear().await;
        assert_eq!(cache.len().await, 0);
    }
}
