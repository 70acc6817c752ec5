use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Keeps local UI state of a view across unmount/mount.
///
/// Views call `restore` when they mount and `save` whenever the kept state changes.
pub trait StateStore: Send + Sync {
    fn restore(&self, key: &str) -> Option<Value>;

    fn save(&self, key: &str, state: Value);
}

pub type SharedStateStore = Arc<dyn StateStore>;

/// In-memory store, lives as long as the page
#[derive(Clone, Debug, Default)]
pub struct MemoryStateStore {
    states: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStateStore {
        Arc::new(Self::new())
    }
}

impl StateStore for MemoryStateStore {
    fn restore(&self, key: &str) -> Option<Value> {
        self.states.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, state: Value) {
        if let Ok(mut states) = self.states.lock() {
            states.insert(key.to_string(), state);
        }
    }
}

/// Store backed by the browser's localStorage, survives page reloads
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStateStore;

fn get_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl StateStore for LocalStorageStateStore {
    fn restore(&self, key: &str) -> Option<Value> {
        let json = get_local_storage()?.get_item(key).ok()??;
        serde_json::from_str(&json).ok()
    }

    fn save(&self, key: &str, state: Value) {
        let Some(storage) = get_local_storage() else {
            return;
        };
        if storage.set_item(key, &state.to_string()).is_err() {
            log::error!("Failed to save UI state '{}'", key);
        }
    }
}
