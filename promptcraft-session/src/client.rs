use crate::config::Settings;
use crate::error::SessionError;
use crate::redirect::LoginRedirect;
use crate::storage::CredentialStore;
use crate::transport::{
    ApiRequest, BearerAuth, HttpTransport, RawResponse, RefreshOnUnauthorized, Transport,
};
use promptcraft_api::{ApiResponse, Endpoint, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// The production middleware chain.
pub type SessionTransport = RefreshOnUnauthorized<BearerAuth<HttpTransport>, HttpTransport>;

/// Compose the session middleware around `base`. The refresh call goes
/// straight to `base` so it never carries a bearer token and never recurses
/// into another refresh.
pub fn session_chain<T: Transport + Clone>(
    base: T,
    store: CredentialStore,
    redirect: Arc<dyn LoginRedirect>,
    login_path: impl Into<String>,
) -> RefreshOnUnauthorized<BearerAuth<T>, T> {
    RefreshOnUnauthorized::new(
        BearerAuth::new(base.clone(), store.clone()),
        base,
        store,
        redirect,
        login_path,
    )
}

pub struct SessionClient<S = SessionTransport> {
    transport: S,
}

impl SessionClient {
    pub fn new(
        settings: &Settings,
        store: CredentialStore,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self, SessionError> {
        let http = HttpTransport::from_settings(settings)?;
        Ok(Self::with_transport(session_chain(
            http,
            store,
            redirect,
            settings.login_path.clone(),
        )))
    }
}

impl<S: Transport> SessionClient<S> {
    pub fn with_transport(transport: S) -> Self {
        Self { transport }
    }

    /// Send a request through the middleware chain. Non-2xx statuses left
    /// after the refresh policy come back as [`SessionError::Status`].
    pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse, SessionError> {
        self.transport.send(request).await?.error_for_status()
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<serde_json::Value>,
    ) -> Result<RawResponse, SessionError> {
        let mut request = ApiRequest::new(method, path);
        if let Some(ref query) = query {
            request = request.query(query)?;
        }
        request.body = body;
        self.execute(request).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>, SessionError> {
        self.execute(ApiRequest::get(path)).await?.json()
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, SessionError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(ApiRequest::post(path).json(body)?)
            .await?
            .json()
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, SessionError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(ApiRequest::put(path).json(body)?)
            .await?
            .json()
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, SessionError> {
        self.execute(ApiRequest::delete(path)).await?.json()
    }

    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<E::Response, SessionError> {
        let request = ApiRequest::from_endpoint(endpoint)?;
        self.execute(request).await?.json()
    }
}
