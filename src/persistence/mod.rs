//! Persistence for best scores and preferences
//!
//! Features:
//! - `KeyValueStore` string store: LocalStorage on the web, in-memory elsewhere
//! - JSON load/save helpers that fall back to defaults on missing or corrupt data
//! - `CloudSync`: fire-and-forget upload of new records

pub mod store;
pub mod sync;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;
pub use store::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use sync::HttpSync;
pub use sync::{CloudSync, NullSync, ScoreUpload};

/// Storage key for the score book
pub const SCORES_KEY: &str = "frostbite_scores";
/// Storage key for player settings
pub const SETTINGS_KEY: &str = "frostbite_settings";

/// Storage errors
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// No storage backend (private browsing, no window)
    #[error("storage unavailable")]
    Unavailable,

    /// Backend rejected the operation (quota, security)
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Stored value is not valid JSON for the expected type
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Read and decode `key`; `Ok(None)` when nothing is stored
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write `value` under `key`
pub fn save_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Load `key`, falling back to `T::default()` when missing or unreadable
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            log::info!("No saved data under '{}', using defaults", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Discarding saved data under '{}': {}", key, e);
            T::default()
        }
    }
}

/// Save `value`, logging instead of failing
pub fn save_or_log<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save_json(store, key, value) {
        log::warn!("Failed to save '{}': {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Prefs {
        volume: f32,
        name: String,
    }

    #[test]
    fn test_json_roundtrip_through_store() {
        let mut store = MemoryStore::default();
        let prefs = Prefs {
            volume: 0.5,
            name: "skier".to_string(),
        };
        save_json(&mut store, "prefs", &prefs).unwrap();
        let loaded: Option<Prefs> = load_json(&store, "prefs").unwrap();
        assert_eq!(loaded, Some(prefs));
    }

    #[test]
    fn test_corrupt_json_falls_back() {
        let mut store = MemoryStore::default();
        store.set("prefs", "{not json").unwrap();
        assert!(matches!(
            load_json::<Prefs>(&store, "prefs"),
            Err(StoreError::Parse(_))
        ));
        let prefs: Prefs = load_or_default(&store, "prefs");
        assert_eq!(prefs, Prefs::default());
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::default();
        assert!(load_json::<Prefs>(&store, "absent").unwrap().is_none());
    }
}
