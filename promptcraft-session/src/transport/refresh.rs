use super::{ApiRequest, RawResponse, Transport};
use crate::error::SessionError;
use crate::redirect::LoginRedirect;
use crate::storage::CredentialStore;
use promptcraft_api::endpoints::auth::TokenPair;
use promptcraft_api::{ApiResponse, Request};
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{info, warn};

/// Recovers from an expired access token.
///
/// A 401 on a request that has not been retried yet triggers one refresh call
/// through `refresh` (which bypasses this middleware), then a single resend
/// of the original request with the new token. Whatever the resend returns is
/// the result. If the refresh cannot be made or fails, the stored session is
/// cleared, the login redirect fires, and the original 401 is returned.
///
/// Concurrent requests that hit 401 each run their own refresh; the store
/// keeps whichever pair was written last.
pub struct RefreshOnUnauthorized<T, R> {
    inner: T,
    refresh: R,
    store: CredentialStore,
    redirect: Arc<dyn LoginRedirect>,
    login_path: String,
}

impl<T, R> RefreshOnUnauthorized<T, R> {
    pub fn new(
        inner: T,
        refresh: R,
        store: CredentialStore,
        redirect: Arc<dyn LoginRedirect>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            refresh,
            store,
            redirect,
            login_path: login_path.into(),
        }
    }
}

impl<T: Transport, R: Transport> RefreshOnUnauthorized<T, R> {
    async fn refresh_tokens(&self) -> Result<TokenPair, SessionError> {
        let refresh_token = self
            .store
            .refresh_token()
            .ok_or_else(|| SessionError::Refresh("No refresh token available".to_string()))?;

        let request = ApiRequest::from_endpoint(&Request::auth().refresh(refresh_token))?;
        let response = self.refresh.send(request).await?.error_for_status()?;
        let tokens = response.json::<ApiResponse<TokenPair>>()?.into_data()?;

        self.store.save_tokens(&tokens)?;
        Ok(tokens)
    }

    fn abandon_session(&self, reason: &SessionError) {
        warn!(error = %reason, "Token refresh failed, clearing session");
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear session after refresh failure");
        }
        self.redirect.redirect_to_login(&self.login_path);
    }
}

impl<T: Transport, R: Transport> Transport for RefreshOnUnauthorized<T, R> {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, SessionError> {
        if request.retried {
            return self.inner.send(request).await;
        }

        let mut retry = request.clone();
        let response = self.inner.send(request).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        match self.refresh_tokens().await {
            Ok(tokens) => {
                info!(path = %retry.path, "Access token refreshed, retrying request");
                retry.retried = true;
                retry.bearer = Some(tokens.access_token);
                self.inner.send(retry).await
            }
            Err(e) => {
                self.abandon_session(&e);
                Ok(response)
            }
        }
    }
}
