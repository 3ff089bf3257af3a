//! Transport layer and the middleware composed around it.

mod bearer;
mod http;
mod refresh;

pub use bearer::BearerAuth;
pub use http::HttpTransport;
pub use refresh::RefreshOnUnauthorized;

use crate::error::SessionError;
use promptcraft_api::{Endpoint, Method, RequestData};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;

/// Sends one request and hands back whatever the server answered, including
/// error statuses. Only failures to obtain a response are `Err`.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, SessionError>> + Send;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Relative to the base URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Bearer credential to attach, filled in by [`BearerAuth`].
    pub bearer: Option<String>,
    /// Set on the single resend that follows a token refresh.
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, SessionError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Flatten a serializable struct or map into query pairs. `null` fields
    /// are dropped.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self, SessionError> {
        match serde_json::to_value(query)? {
            serde_json::Value::Object(fields) => {
                for (name, value) in fields {
                    let value = match value {
                        serde_json::Value::Null => continue,
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    self.query.push((name, value));
                }
            }
            serde_json::Value::Null => {}
            other => {
                return Err(SessionError::Configuration(format!(
                    "query parameters must serialize to an object, got {}",
                    other
                )))
            }
        }
        Ok(self)
    }

    pub fn from_endpoint<E: Endpoint>(endpoint: &E) -> Result<Self, SessionError> {
        let request = Self::new(E::METHOD, endpoint.endpoint());
        match endpoint.data() {
            RequestData::Empty => Ok(request),
            RequestData::Query(query) => request.query(query),
            RequestData::Json(body) => request.json(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn a non-2xx response into [`SessionError::Status`].
    pub fn error_for_status(self) -> Result<Self, SessionError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SessionError::from_status(self.status, &self.body))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SessionError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptcraft_api::Request;

    #[test]
    fn query_pairs_from_endpoint() {
        let list = Request::challenges().list().page(2u32).difficulty("Advanced");
        let request = ApiRequest::from_endpoint(&list).unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/challenges");
        let mut pairs = request.query.clone();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("difficulty".to_string(), "Advanced".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
        assert!(request.body.is_none());
        assert!(!request.retried);
    }

    #[test]
    fn json_body_from_endpoint() {
        let evaluate = Request::evaluations().evaluate("c1", "Design a schema");
        let request = ApiRequest::from_endpoint(&evaluate).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.body,
            Some(serde_json::json!({"challengeId": "c1", "promptText": "Design a schema"}))
        );
    }

    #[test]
    fn scalar_query_is_rejected() {
        assert!(ApiRequest::get("/x").query(&5).is_err());
    }

    #[test]
    fn error_for_status_keeps_success() {
        assert!(RawResponse::new(StatusCode::CREATED, "{}")
            .error_for_status()
            .is_ok());
        let err = RawResponse::new(StatusCode::NOT_FOUND, "")
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
