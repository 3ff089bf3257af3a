use crate::error::SessionError;
use crate::storage::CredentialStore;
use promptcraft_api::endpoints::auth::{TokenPair, User};
use tracing::warn;

/// In-memory view of who is signed in, backed by the durable store.
///
/// Owned by whatever drives the UI; pass it where it is needed instead of
/// reaching for global state.
pub struct SessionContext {
    store: CredentialStore,
    user: Option<User>,
    loading: bool,
}

impl SessionContext {
    pub fn new(store: CredentialStore) -> Self {
        Self {
            store,
            user: None,
            loading: true,
        }
    }

    /// Load the cached identity once at startup. The identity is only trusted
    /// when an access token is stored next to it; an unreadable identity
    /// wipes the whole session.
    pub fn hydrate(&mut self) -> Option<&User> {
        let identity = self.store.identity_json();
        let token = self.store.access_token();

        if let (Some(json), Some(_)) = (identity, token) {
            match serde_json::from_str::<User>(&json) {
                Ok(user) => self.user = Some(user),
                Err(e) => {
                    warn!(error = %e, "Failed to parse stored user, clearing session");
                    if let Err(e) = self.store.clear() {
                        warn!(error = %e, "Failed to clear session");
                    }
                }
            }
        }

        self.loading = false;
        self.user.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True until [`hydrate`](Self::hydrate) has run.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn login(&mut self, user: User, tokens: &TokenPair) -> Result<(), SessionError> {
        self.store.save_session(&user, tokens)?;
        self.user = Some(user);
        Ok(())
    }

    pub fn update_user(&mut self, user: User) -> Result<(), SessionError> {
        self.store.save_identity(&user)?;
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.user = None;
        self.store.clear()
    }
}
