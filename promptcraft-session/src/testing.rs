//! In-memory doubles for exercising the session middleware without a server.

use crate::error::SessionError;
use crate::redirect::LoginRedirect;
use crate::storage::{SessionStorage, StorageKey};
use crate::transport::{ApiRequest, RawResponse, Transport};
use chrono::{DateTime, Utc};
use promptcraft_api::endpoints::auth::{Role, User};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

type Handler = dyn Fn(&ApiRequest) -> Result<RawResponse, SessionError> + Send + Sync;

/// Transport answering from a closure and recording every request it sees.
///
/// The answer is computed when the request is sent, then the task yields once
/// before returning it, so concurrently driven requests interleave the way
/// real network calls do.
#[derive(Clone)]
pub struct ScriptedTransport {
    handler: Arc<Handler>,
    log: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<RawResponse, SessionError> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Requests sent to `path`.
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, SessionError> {
        let result = (self.handler)(&request);
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
        tokio::task::yield_now().await;
        result
    }
}

/// JSON response with the given status.
pub fn json_response(status: StatusCode, body: serde_json::Value) -> RawResponse {
    RawResponse::new(status, body.to_string())
}

/// Success envelope wrapping `data`.
pub fn envelope(data: serde_json::Value) -> RawResponse {
    json_response(
        StatusCode::OK,
        serde_json::json!({"success": true, "data": data}),
    )
}

pub fn unauthorized() -> RawResponse {
    json_response(
        StatusCode::UNAUTHORIZED,
        serde_json::json!({"success": false, "message": "Invalid or expired token"}),
    )
}

/// Counts login redirects and remembers where they pointed.
#[derive(Clone, Default)]
pub struct RecordingRedirect {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RecordingRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn count(&self) -> usize {
        self.paths().len()
    }
}

impl LoginRedirect for RecordingRedirect {
    fn redirect_to_login(&self, login_path: &str) {
        self.paths
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(login_path.to_string());
    }
}

/// Storage that is switched off, like a browser with storage disabled.
pub struct UnavailableStorage;

impl SessionStorage for UnavailableStorage {
    fn get(&self, _key: StorageKey) -> Result<Option<String>, SessionError> {
        Err(SessionError::Storage("storage disabled".to_string()))
    }

    fn set(&self, _key: StorageKey, _value: &str) -> Result<(), SessionError> {
        Err(SessionError::Storage("storage disabled".to_string()))
    }

    fn remove(&self, _key: StorageKey) -> Result<(), SessionError> {
        Err(SessionError::Storage("storage disabled".to_string()))
    }
}

/// A regular user whose username is derived from `id`.
pub fn sample_user(id: &str) -> User {
    let created = DateTime::<Utc>::from_timestamp(1_736_933_400, 0).unwrap_or_default();
    User {
        id: id.into(),
        username: format!("user-{}", id),
        email: format!("{}@example.com", id),
        role: Role::User,
        total_attempts: 3,
        best_score: 8.5,
        average_score: 7.0,
        created_at: created,
        updated_at: created,
    }
}
