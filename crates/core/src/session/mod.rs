//! Access token persistence
//!
//! The token lives in exactly one slot of some persistent store. The
//! [`TokenStore`] trait abstracts that slot so the browser, the CLI and tests
//! can each plug in their own backend; [`SessionStore`] layers the session
//! semantics on top (empty tokens are never written, backend failures are
//! logged and read as "no session").

#[cfg(not(target_arch = "wasm32"))]
mod file;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::StorageError;
use crate::identity::Identity;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, warn};

/// A single persistent slot holding the raw access token
pub trait TokenStore {
    /// Read the stored token, if any
    fn get(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the stored token
    fn set(&self, token: &str) -> Result<(), StorageError>;

    /// Delete the stored token. Deleting an empty slot is not an error.
    fn delete(&self) -> Result<(), StorageError>;
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn get(&self) -> Result<Option<String>, StorageError> {
        (**self).get()
    }

    fn set(&self, token: &str) -> Result<(), StorageError> {
        (**self).set(token)
    }

    fn delete(&self) -> Result<(), StorageError> {
        (**self).delete()
    }
}

impl<T: TokenStore + ?Sized> TokenStore for Rc<T> {
    fn get(&self) -> Result<Option<String>, StorageError> {
        (**self).get()
    }

    fn set(&self, token: &str) -> Result<(), StorageError> {
        (**self).set(token)
    }

    fn delete(&self) -> Result<(), StorageError> {
        (**self).delete()
    }
}

/// Session operations over a [`TokenStore`]
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: TokenStore> SessionStore<S> {
    /// Create a session store backed by `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist the token. Empty tokens are ignored.
    pub fn save(&self, token: &str) {
        if token.is_empty() {
            debug!("Ignoring empty access token");
            return;
        }

        if let Err(e) = self.store.set(token) {
            warn!(error = %e, "Failed to save access token");
        }
    }

    /// Read the stored token
    pub fn read(&self) -> Option<String> {
        match self.store.get() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read access token");
                None
            }
        }
    }

    /// Delete the stored token
    pub fn remove(&self) {
        if let Err(e) = self.store.delete() {
            warn!(error = %e, "Failed to remove access token");
        }
    }

    /// Decode a token's claims without verifying its signature
    pub fn decode(&self, token: &str) -> Option<Identity> {
        Identity::decode(token)
    }

    /// Whether a token is present. Says nothing about validity or expiry.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Decoded identity of the stored token, if there is one
    pub fn identity(&self) -> Option<Identity> {
        self.read().and_then(|token| self.decode(&token))
    }

    /// The underlying token store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use crate::tests::encode_token;
    use serde_json::json;

    /// Store whose backend always fails
    struct BrokenStore;

    impl TokenStore for BrokenStore {
        fn get(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("no storage".into()))
        }

        fn set(&self, _token: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("no storage".into()))
        }

        fn delete(&self) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("no storage".into()))
        }
    }

    #[test]
    fn test_save_then_read() {
        let session = SessionStore::new(MemoryTokenStore::new());
        session.save("abc.def.ghi");
        assert_eq!(session.read().as_deref(), Some("abc.def.ghi"));

        // Saving the same token again leaves the slot unchanged
        session.save("abc.def.ghi");
        assert_eq!(session.read().as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_remove_then_read() {
        let session = SessionStore::new(MemoryTokenStore::new());
        session.save("token");
        session.remove();
        assert_eq!(session.read(), None);

        // Removing twice is fine
        session.remove();
        assert_eq!(session.read(), None);
    }

    #[test]
    fn test_empty_token_is_never_stored() {
        let session = SessionStore::new(MemoryTokenStore::new());
        session.save("");
        assert_eq!(session.read(), None);

        session.save("existing");
        session.save("");
        assert_eq!(session.read().as_deref(), Some("existing"));
    }

    #[test]
    fn test_is_authenticated_checks_presence_only() {
        let session = SessionStore::new(MemoryTokenStore::new());
        assert!(!session.is_authenticated());

        session.save("not-a-jwt");
        assert!(session.is_authenticated());
        assert!(session.identity().is_none());
    }

    #[test]
    fn test_identity_from_stored_token() {
        let session = SessionStore::new(MemoryTokenStore::new());
        session.save(&encode_token(&json!({ "role": "ADMIN", "sub": "u1" })));

        let identity = session.identity().unwrap();
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.sub.as_deref(), Some("u1"));
    }

    #[test]
    fn test_backend_failures_read_as_no_session() {
        let session = SessionStore::new(BrokenStore);
        session.save("token");
        session.remove();
        assert_eq!(session.read(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_shared_store_sees_same_slot() {
        let store = Arc::new(MemoryTokenStore::new());
        let first = SessionStore::new(store.clone());
        let second = SessionStore::new(store);

        first.save("shared");
        assert_eq!(second.read().as_deref(), Some("shared"));
        second.remove();
        assert!(!first.is_authenticated());
    }
}
