//! Browser collaborators: `localStorage` and the JS clock.
//!
//! Only usable inside a browser; every call goes through `web_sys` /
//! `js_sys` imports.

use tb_core::clock::Clock;
use tb_core::persist::KeyValueStore;

/// `window.localStorage`. Reads fail soft when storage is unavailable
/// (private mode, sandboxed iframe); writes report why they failed.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let storage = storage().ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("localStorage write failed: {e:?}"))
    }
}

/// `Date.now()`, in milliseconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsClock;

impl Clock for JsClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
