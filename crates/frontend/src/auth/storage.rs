//! `localStorage`-backed token store

use tracing::debug;
use voucherify_core::{SessionConfig, StorageError, TokenStore};
use web_sys::Storage;

/// Token slot in the browser's `localStorage`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebTokenStore {
    key: String,
}

impl Default for WebTokenStore {
    fn default() -> Self {
        Self::new(SessionConfig::TOKEN_KEY)
    }
}

impl WebTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".into()))
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{e:?}"))
}

impl TokenStore for WebTokenStore {
    fn get(&self) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(&self.key).map_err(js_error)
    }

    fn set(&self, token: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(&self.key, token).map_err(js_error)?;
        debug!(key = %self.key, "Stored access token");
        Ok(())
    }

    fn delete(&self) -> Result<(), StorageError> {
        Self::storage()?.remove_item(&self.key).map_err(js_error)
    }
}
