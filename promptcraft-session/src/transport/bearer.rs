use super::{ApiRequest, RawResponse, Transport};
use crate::error::SessionError;
use crate::storage::CredentialStore;

/// Attaches the stored access token to every request, read at send time.
/// A request marked retried keeps the token it was given by the refresh.
#[derive(Clone)]
pub struct BearerAuth<T> {
    inner: T,
    store: CredentialStore,
}

impl<T> BearerAuth<T> {
    pub fn new(inner: T, store: CredentialStore) -> Self {
        Self { inner, store }
    }
}

impl<T: Transport> Transport for BearerAuth<T> {
    async fn send(&self, mut request: ApiRequest) -> Result<RawResponse, SessionError> {
        if !request.retried {
            request.bearer = self.store.access_token();
        }
        self.inner.send(request).await
    }
}
