mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::SessionError;
use promptcraft_api::endpoints::auth::{TokenPair, User};
use std::sync::Arc;
use tracing::warn;

/// The three values that make up a persisted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    AccessToken,
    RefreshToken,
    User,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::AccessToken,
        StorageKey::RefreshToken,
        StorageKey::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::AccessToken => "promptcraft_access_token",
            StorageKey::RefreshToken => "promptcraft_refresh_token",
            StorageKey::User => "promptcraft_user",
        }
    }
}

/// Durable key-value store surviving restarts. Each call is atomic on its own;
/// nothing groups several calls into a transaction.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: StorageKey) -> Result<Option<String>, SessionError>;
    fn set(&self, key: StorageKey, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: StorageKey) -> Result<(), SessionError>;
}

/// Typed view over the session keys. Cheap to clone; clones share storage.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn SessionStorage>,
}

impl CredentialStore {
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn from_shared(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Unreadable storage counts as an empty value so requests go out
    /// unauthenticated instead of failing.
    fn read(&self, key: StorageKey) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "Session storage unreadable, treating as empty");
                None
            }
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(StorageKey::AccessToken)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(StorageKey::RefreshToken)
    }

    /// Raw serialized identity, if any.
    pub fn identity_json(&self) -> Option<String> {
        self.read(StorageKey::User)
    }

    pub fn identity(&self) -> Result<Option<User>, SessionError> {
        self.identity_json()
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(SessionError::from)
    }

    pub fn save_session(&self, user: &User, tokens: &TokenPair) -> Result<(), SessionError> {
        self.save_identity(user)?;
        self.save_tokens(tokens)
    }

    pub fn save_tokens(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        self.storage
            .set(StorageKey::AccessToken, &tokens.access_token)?;
        self.storage
            .set(StorageKey::RefreshToken, &tokens.refresh_token)
    }

    pub fn save_identity(&self, user: &User) -> Result<(), SessionError> {
        let json = serde_json::to_string(user)?;
        self.storage.set(StorageKey::User, &json)
    }

    /// Remove every session key. All removals are attempted; the first failure
    /// is reported.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut first_error = None;
        for key in StorageKey::ALL {
            if let Err(e) = self.storage.remove(key) {
                warn!(key = key.as_str(), error = %e, "Failed to remove session key");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_user, UnavailableStorage};

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        }
    }

    #[test]
    fn session_round_trip() {
        let store = CredentialStore::new(MemoryStorage::new());
        let user = sample_user("u1");
        store.save_session(&user, &pair("a-1", "r-1")).unwrap();

        assert_eq!(store.access_token().as_deref(), Some("a-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("r-1"));
        assert_eq!(store.identity().unwrap(), Some(user));
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(StorageKey::AccessToken, "").unwrap();
        let store = CredentialStore::new(storage);
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let store = CredentialStore::new(MemoryStorage::new());
        store.clear().unwrap();
        store.save_tokens(&pair("a", "r")).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.access_token(), None);
        assert_eq!(store.identity().unwrap(), None);
    }

    #[test]
    fn unavailable_storage_fails_closed() {
        let store = CredentialStore::new(UnavailableStorage);
        assert_eq!(store.access_token(), None);
        assert_eq!(store.refresh_token(), None);
        assert!(store.save_tokens(&pair("a", "r")).is_err());
        assert!(store.clear().is_err());
    }

    #[test]
    fn corrupt_identity_is_an_error() {
        let storage = MemoryStorage::new();
        storage.set(StorageKey::User, "{not json").unwrap();
        let store = CredentialStore::new(storage);
        assert!(store.identity().is_err());
    }
}
