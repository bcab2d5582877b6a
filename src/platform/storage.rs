//! JSON key/value persistence
//!
//! Records are small JSON documents in LocalStorage. Native builds have no
//! backing store: loads find nothing and saves are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Load and decode a stored value. Missing or corrupt entries yield `None`.
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;

    let json = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding corrupt record {}: {}", key, e);
            None
        }
    }
}

/// Encode and store a value
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        match serde_json::to_string(value) {
            Ok(json) => {
                if storage.set_item(key, &json).is_err() {
                    log::warn!("LocalStorage rejected {}", key);
                }
            }
            Err(e) => log::warn!("Failed to encode {}: {}", key, e),
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) {
    // No-op for native
}
