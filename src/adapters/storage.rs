//! Persistence Ports
//!
//! `LocalStore` wraps `localStorage`; `CookieStore` keeps the access token in
//! a path-wide cookie.

use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

use flywheel_core::session::{KeyValueStore, StorageError};

pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?.remove_item(key).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// Cookies live for the browser session; the server decides token lifetime.
pub struct CookieStore;

impl CookieStore {
    fn document() -> Result<HtmlDocument, StorageError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or(StorageError::Unavailable)
    }

    fn write(&self, key: &str, cookie: &str) -> Result<(), StorageError> {
        Self::document()?.set_cookie(cookie).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let cookies = Self::document()?.cookie().map_err(|_| StorageError::Unavailable)?;
        Ok(cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| js_sys::decode_uri_component(value).ok())
            .and_then(|value| value.as_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let encoded: String = js_sys::encode_uri_component(value).into();
        self.write(key, &format!("{}={}; path=/", key, encoded))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.write(key, &format!("{}=; path=/; max-age=0", key))
    }
}
