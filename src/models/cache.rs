use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};
use tracing::debug;

#[derive(Clone)]
pub struct CacheEntry {
    pub data: Value,
    pub stored_at: SystemTime,
}

/// In-memory TTL cache for upstream responses.
///
/// The freshness window is supplied by the caller on every read, so one
/// entry can be checked against different TTLs by different callers.
/// Expiry is lazy: a stale entry is dropped the next time it is read.
/// The mutex is held only for the map operation, never across I/O.
pub struct TtlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the stored value if it is younger than `ttl`, evicting it
    /// otherwise.
    pub fn get(&self, key: &str, ttl: Duration) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) => {
                let fresh = entry
                    .stored_at
                    .elapsed()
                    .map(|elapsed| elapsed < ttl)
                    .unwrap_or(false);
                if fresh {
                    debug!("Cache hit for {}", key);
                    Some(entry.data.clone())
                } else {
                    debug!("Cache entry expired for {}", key);
                    entries.remove(key);
                    None
                }
            }
            None => {
                debug!("Cache miss for {}", key);
                None
            }
        }
    }

    pub fn set(&self, key: &str, data: Value) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                stored_at: SystemTime::now(),
            },
        );
    }

    pub fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Rewinds an entry's stored_at so expiry paths can be tested without
    /// sleeping.
    #[cfg(test)]
    pub fn backdate(&self, key: &str, age: Duration) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.get_mut(key) {
            entry.stored_at = SystemTime::now() - age;
        }
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get_within_ttl() {
        let cache = TtlCache::new();
        cache.set("prices", json!([1, 2, 3]));
        assert_eq!(
            cache.get("prices", Duration::from_secs(60)),
            Some(json!([1, 2, 3]))
        );
    }

    #[test]
    fn expired_entry_is_evicted() {
        let cache = TtlCache::new();
        cache.set("fng", json!({"value": 62}));
        cache.backdate("fng", Duration::from_secs(301));

        assert_eq!(cache.get("fng", Duration::from_secs(300)), None);
        // Eviction is permanent: even a huge TTL no longer sees the entry.
        assert_eq!(cache.get("fng", Duration::from_secs(u64::MAX / 2)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn per_read_ttl_on_one_entry() {
        let cache = TtlCache::new();
        cache.set("global", json!({"btc_dominance": 52.0}));
        cache.backdate("global", Duration::from_secs(120));

        // A lenient caller still sees the entry...
        assert!(cache.get("global", Duration::from_secs(600)).is_some());
        // ...while a strict caller treats it as absent and evicts it.
        assert!(cache.get("global", Duration::from_secs(60)).is_none());
        assert!(cache.get("global", Duration::from_secs(600)).is_none());
    }

    #[test]
    fn set_overwrites_prior_entry() {
        let cache = TtlCache::new();
        cache.set("k", json!(1));
        cache.set("k", json!(2));
        assert_eq!(cache.get("k", Duration::from_secs(10)), Some(json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let cache = TtlCache::new();
        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.remove("a");
        assert!(cache.get("a", Duration::from_secs(10)).is_none());
        cache.clear();
        assert!(cache.is_empty());
    }
}
