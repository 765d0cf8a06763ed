//! In-memory token store

use super::TokenStore;
use crate::error::StorageError;
use std::sync::{Arc, Mutex};

/// Token store kept in process memory. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>, StorageError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("token slot lock poisoned".into()))?;
        Ok(slot.clone())
    }

    fn set(&self, token: &str) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("token slot lock poisoned".into()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn delete(&self) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("token slot lock poisoned".into()))?;
        *slot = None;
        Ok(())
    }
}
