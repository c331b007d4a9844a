//! Browser `localStorage` helpers for persisted client settings.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session token, API base URL override, and theme preference all live in
//! `localStorage`. These helpers centralize the hydrate-only web-sys glue so
//! callers never touch `Storage` directly. Outside the browser every read is
//! empty and every write is a no-op, which keeps SSR deterministic.

/// Read the raw string stored under `key`.
pub fn read_string(key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        storage.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Overwrite the value stored under `key`.
pub fn write_string(key: &str, value: &str) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage write rejected for key {key}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Remove `key` from storage entirely.
pub fn remove(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}
