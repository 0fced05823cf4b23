//! Typed entity cache over the raw state store.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::store::StateStore;

/// Per-entity-type cache of serialized records.
///
/// Reads fail soft: a missing key, an unreadable store, or malformed JSON
/// all surface as "no cached data" so that a corrupt cache can never block
/// hydration.
#[derive(Clone)]
pub struct EntityCache {
    store: Arc<dyn StateStore>,
}

impl EntityCache {
    /// Create a cache over the given state store.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Load a cached record list, or `None` when absent or malformed.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        self.load_value(key)
    }

    /// Save a record list under `key`.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        self.store.set(key, &raw)
    }

    /// Load a single cached value, or `None` when absent or malformed.
    pub fn load_value<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(key, %error, "discarding malformed cached value");
                None
            }
        }
    }

    /// Save a single value under `key`.
    pub fn save_value<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Drop whatever is cached under `key`.
    pub fn clear(&self, key: &str) -> Result<()> {
        self.store.remove(key)
    }

    /// Access the underlying state store.
    pub fn store(&self) -> &Arc<dyn StateStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::store::MemoryStateStore;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Sample {
        id: String,
        label: String,
    }

    fn setup() -> EntityCache {
        EntityCache::new(Arc::new(MemoryStateStore::new()))
    }

    fn sample(id: &str) -> Sample {
        Sample {
            id: id.to_string(),
            label: format!("label-{id}"),
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let cache = setup();
        let records = vec![sample("a"), sample("b")];

        cache.save("alcove.test", &records).unwrap();
        let loaded: Vec<Sample> = cache.load("alcove.test").unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_absent_key_loads_as_none() {
        let cache = setup();
        assert_eq!(cache.load::<Sample>("alcove.missing"), None);
    }

    #[test]
    fn test_malformed_json_loads_as_none() {
        let cache = setup();
        cache.store.set("alcove.test", "{not json!").unwrap();
        assert_eq!(cache.load::<Sample>("alcove.test"), None);
    }

    #[test]
    fn test_wrong_shape_loads_as_none() {
        let cache = setup();
        cache.store.set("alcove.test", "[{\"id\":42}]").unwrap();
        assert_eq!(cache.load::<Sample>("alcove.test"), None);
    }

    #[test]
    fn test_clear_removes_cached_list() {
        let cache = setup();
        cache.save("alcove.test", &[sample("a")]).unwrap();
        cache.clear("alcove.test").unwrap();
        assert_eq!(cache.load::<Sample>("alcove.test"), None);
    }

    #[test]
    fn test_single_value_round_trip() {
        let cache = setup();
        cache.save_value("alcove.profile", &sample("me")).unwrap();
        assert_eq!(cache.load_value::<Sample>("alcove.profile"), Some(sample("me")));
    }
}
