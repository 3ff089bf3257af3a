use crate::client::{SessionClient, SessionTransport};
use crate::context::SessionContext;
use crate::error::SessionError;
use crate::transport::Transport;
use promptcraft_api::endpoints::auth::{AuthResponse, TokenPair, User};
use promptcraft_api::Request;
use tracing::{info, warn};

/// Account operations that also keep the [`SessionContext`] in step.
pub struct AuthService<'a, S = SessionTransport> {
    client: &'a SessionClient<S>,
}

impl<'a, S: Transport> AuthService<'a, S> {
    pub fn new(client: &'a SessionClient<S>) -> Self {
        Self { client }
    }

    pub async fn register(
        &self,
        context: &mut SessionContext,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let req = Request::auth().register(username, email, password);
        let auth = self.client.send(&req).await?.into_data()?;
        info!(user = %auth.user.username, "Registered new account");
        Self::establish(context, auth)
    }

    pub async fn login(
        &self,
        context: &mut SessionContext,
        email: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let req = Request::auth().login(email, password);
        let auth = self.client.send(&req).await?.into_data()?;
        info!(user = %auth.user.username, "Logged in");
        Self::establish(context, auth)
    }

    fn establish(context: &mut SessionContext, auth: AuthResponse) -> Result<User, SessionError> {
        context.login(auth.user.clone(), &auth.tokens)?;
        Ok(auth.user)
    }

    /// Tell the backend when there is a session to end, then always clear
    /// local state. A failed backend call does not fail the logout.
    pub async fn logout(&self, context: &mut SessionContext) -> Result<(), SessionError> {
        if context.store().access_token().is_some() {
            if let Err(e) = self.client.send(&Request::auth().logout()).await {
                warn!(error = %e, "Logout request failed, clearing local session anyway");
            }
        }
        context.logout()
    }

    /// Fetch the current account and refresh the cached identity.
    pub async fn me(&self, context: &mut SessionContext) -> Result<User, SessionError> {
        let user = self.client.send(&Request::auth().me()).await?.into_data()?;
        context.update_user(user.clone())?;
        Ok(user)
    }

    /// Exchange a refresh token for a new pair without touching the store.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, SessionError> {
        let req = Request::auth().refresh(refresh_token);
        Ok(self.client.send(&req).await?.into_data()?)
    }
}
