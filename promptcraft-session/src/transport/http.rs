use super::{ApiRequest, RawResponse, Transport};
use crate::config::Settings;
use crate::error::SessionError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Plain reqwest transport against a fixed base URL. Attaches a bearer token
/// only when the request already carries one.
///
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SessionError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, SessionError> {
        Self::new(settings.base_url.clone(), settings.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, SessionError> {
        debug!(
            method = %request.method,
            path = %request.path,
            authenticated = request.bearer.is_some(),
            retried = request.retried,
            "Sending request"
        );

        let mut builder = self
            .http_client
            .request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), path = %request.path, "Received response");
        Ok(RawResponse { status, body })
    }
}
