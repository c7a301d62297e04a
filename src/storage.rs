//! Browser key/value storage behind a small trait.
//!
//! The app persists a handful of plain-JSON values: the session token
//! (tab-scoped), the cart and the dismissed-notification ids (persistent).
//! Domain code talks to [`KeyValueStore`] so it can be exercised natively
//! against [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Session storage: bearer token from `/auth/token`.
pub const TOKEN_KEY: &str = "accessToken";
/// Local storage: serialized cart lines.
pub const CART_KEY: &str = "epn_cart";
/// Local storage: JSON array of dismissed notification ids.
pub const DISMISSED_NOTIFICATIONS_KEY: &str = "dismissedNotifications";
/// Local storage: timestamp bumped whenever a notification is marked read.
pub const NOTIFICATIONS_SYNC_KEY: &str = "actualizar_notificaciones";
/// Local storage: timestamp bumped whenever a notification is dismissed.
pub const DISMISS_SYNC_KEY: &str = "noti_dismiss_sync";
/// Local storage: address a password-reset code was last sent to.
pub const RECOVERY_EMAIL_KEY: &str = "emailToRecover";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Read and deserialize a JSON value; corrupt data reads as absent.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring corrupt '{}' in storage: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => tracing::error!("Failed to serialize '{}': {}", key, e),
    }
}

/// In-memory store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

/// `window.localStorage` / `window.sessionStorage`.
///
/// Outside the browser every read misses and writes are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserStore {
    area: StorageArea,
}

impl BrowserStore {
    pub fn local() -> Self {
        Self {
            area: StorageArea::Local,
        }
    }

    pub fn session() -> Self {
        Self {
            area: StorageArea::Session,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };
        storage.ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("Storage quota exceeded writing '{}'", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for BrowserStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, key: &str, _value: &str) {
        tracing::debug!("{:?} storage unavailable outside the browser ({})", self.area, key);
    }

    fn remove(&self, _key: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: u32,
    }

    #[test]
    fn json_values_survive_save_and_load() {
        let store = MemoryStore::new();
        save_json(&store, "sample", &vec![Sample { id: 3 }]);

        let loaded: Option<Vec<Sample>> = load_json(&store, "sample");
        assert_eq!(loaded, Some(vec![Sample { id: 3 }]));
    }

    #[test]
    fn corrupt_json_reads_as_missing() {
        let store = MemoryStore::new();
        store.set("sample", "{not json");

        let loaded: Option<Sample> = load_json(&store, "sample");
        assert!(loaded.is_none());
    }

    #[test]
    fn remove_clears_key() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "abc");
        store.remove(TOKEN_KEY);
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn browser_store_is_inert_natively() {
        let store = BrowserStore::session();
        store.set(TOKEN_KEY, "abc");
        assert_eq!(store.get(TOKEN_KEY), None);
    }
}
