//! Tag-indexed response cache.
//!
//! Query results are stored under their (operation, arguments) key,
//! carrying the tag set the operation declared. A mutation evicts every
//! entry whose tags intersect its invalidation set.
//!
//! Each key also tracks a monotonic generation, bumped on every
//! eviction. A fetch registers its key and tag set up front and
//! snapshots the generation, then only stores its result if the
//! generation is unchanged; an invalidation landing mid-flight bumps
//! the generation even when the key was never populated, so a slow
//! stale response cannot overwrite the effect of a fresher
//! invalidation.

use crate::operation::Tag;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One cache key's state. The value is absent while the key is only
/// registered (first fetch in flight) or after an eviction.
#[derive(Debug, Clone, Default)]
struct CacheSlot {
    value: Option<Value>,
    tags: Vec<Tag>,
    generation: u64,
}

/// In-memory cache for query responses.
#[derive(Debug, Clone, Default)]
pub struct ResponseCache {
    slots: Arc<RwLock<HashMap<String, CacheSlot>>>,
}

impl ResponseCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached response for a key, if present.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let slots = self.slots.read().await;
        slots.get(key).and_then(|slot| slot.value.clone())
    }

    /// Registers a key's tag set ahead of a fetch and returns the
    /// generation the fetch must present to store its result.
    ///
    /// Registration makes the key visible to [`invalidate`] while the
    /// fetch is still in flight, first fetch included.
    ///
    /// [`invalidate`]: ResponseCache::invalidate
    pub async fn begin_fetch(&self, key: &str, tags: &[Tag]) -> u64 {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(key.to_string()).or_default();
        slot.tags = tags.to_vec();
        slot.generation
    }

    /// Stores a response if the key's generation still matches the one
    /// snapshotted by [`begin_fetch`].
    ///
    /// Returns `true` when the value was stored, `false` when a newer
    /// invalidation made the response stale.
    ///
    /// [`begin_fetch`]: ResponseCache::begin_fetch
    pub async fn store_if_current(&self, key: &str, generation: u64, value: Value) -> bool {
        let mut slots = self.slots.write().await;
        match slots.get_mut(key) {
            Some(slot) if slot.generation == generation => {
                slot.value = Some(value);
                true
            }
            Some(slot) => {
                tracing::debug!(
                    %key,
                    generation,
                    current = slot.generation,
                    "discarding stale response"
                );
                false
            }
            None => false,
        }
    }

    /// Evicts every key whose tag set intersects the invalidation set
    /// and bumps its generation, registered-but-unpopulated keys
    /// included.
    pub async fn invalidate(&self, invalidated: &[Tag]) {
        if invalidated.is_empty() {
            return;
        }
        let mut slots = self.slots.write().await;
        for slot in slots.values_mut() {
            if slot
                .tags
                .iter()
                .any(|tag| invalidated.iter().any(|inv| tag.intersects(inv)))
            {
                slot.value = None;
                slot.generation += 1;
            }
        }
    }

    /// Drops every cached value and bumps every generation, so results
    /// of in-flight fetches are discarded too. Used on logout.
    pub async fn clear(&self) {
        let mut slots = self.slots.write().await;
        for slot in slots.values_mut() {
            slot.value = None;
            slot.generation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_store_and_get() {
        let cache = ResponseCache::new();
        let generation = cache.begin_fetch("k", &[Tag::Post]).await;
        assert!(cache.store_if_current("k", generation, json!(1)).await);
        assert_eq!(cache.get("k").await, Some(json!(1)));
    }

    #[tokio::test]
    async fn test_store_without_registration_is_refused() {
        let cache = ResponseCache::new();
        assert!(!cache.store_if_current("k", 0, json!(1)).await);
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_invalidation_evicts_intersecting_tags_only() {
        let cache = ResponseCache::new();
        let g1 = cache.begin_fetch("posts", &[Tag::Post]).await;
        cache.store_if_current("posts", g1, json!(1)).await;
        let g2 = cache.begin_fetch("profile", &[Tag::Profile]).await;
        cache.store_if_current("profile", g2, json!(2)).await;

        cache.invalidate(&[Tag::Post]).await;

        assert!(cache.get("posts").await.is_none());
        assert_eq!(cache.get("profile").await, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_post_id_invalidation_evicts_list_entries() {
        let cache = ResponseCache::new();
        let g = cache.begin_fetch("posts", &[Tag::Post]).await;
        cache.store_if_current("posts", g, json!(1)).await;
        let g = cache
            .begin_fetch("post42", &[Tag::PostId("42".to_string())])
            .await;
        cache.store_if_current("post42", g, json!(2)).await;
        let g = cache
            .begin_fetch("post7", &[Tag::PostId("7".to_string())])
            .await;
        cache.store_if_current("post7", g, json!(3)).await;

        cache.invalidate(&[Tag::PostId("42".to_string())]).await;

        assert!(cache.get("posts").await.is_none());
        assert!(cache.get("post42").await.is_none());
        assert_eq!(cache.get("post7").await, Some(json!(3)));
    }

    #[tokio::test]
    async fn test_stale_response_is_not_stored_after_invalidation() {
        let cache = ResponseCache::new();
        let generation = cache.begin_fetch("posts", &[Tag::Post]).await;
        cache.store_if_current("posts", generation, json!("old")).await;
        cache.invalidate(&[Tag::Post]).await;

        let stored = cache
            .store_if_current("posts", generation, json!("stale"))
            .await;

        assert!(!stored);
        assert!(cache.get("posts").await.is_none());
    }

    #[tokio::test]
    async fn test_invalidation_during_first_fetch_blocks_the_store() {
        let cache = ResponseCache::new();
        // The key has never been populated; the fetch is in flight when
        // a mutation invalidates its tag.
        let generation = cache.begin_fetch("posts", &[Tag::Post]).await;
        cache.invalidate(&[Tag::Post]).await;

        let stored = cache
            .store_if_current("posts", generation, json!("pre-mutation"))
            .await;

        assert!(!stored);
        assert!(cache.get("posts").await.is_none());
    }

    #[tokio::test]
    async fn test_clear_drops_everything_and_outdates_in_flight_fetches() {
        let cache = ResponseCache::new();
        let g1 = cache.begin_fetch("a", &[Tag::Post]).await;
        cache.store_if_current("a", g1, json!(1)).await;
        let g2 = cache.begin_fetch("b", &[Tag::Profile]).await;

        cache.clear().await;

        assert!(cache.get("a").await.is_none());
        assert!(!cache.store_if_current("b", g2, json!(2)).await);
    }
}
