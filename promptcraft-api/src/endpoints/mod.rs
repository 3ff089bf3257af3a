pub mod auth;
pub mod challenges;
pub mod evaluations;
pub mod leaderboard;
pub mod users;

use crate::error::EnvelopeError;
use crate::macros::string_id;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub use reqwest::Method;

/// A typed backend call: where it goes, how it is sent, and what comes back.
pub trait Endpoint {
    type Data: Serialize;
    type Response: DeserializeOwned;
    const METHOD: Method = Method::GET;

    /// Path relative to the configured base URL, starting with `/`.
    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestData<T> {
    Empty,
    Query(T),
    Json(T),
}

/// Envelope wrapping every backend response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, treating `success: false` and a missing `data`
    /// field as errors.
    pub fn into_data(self) -> Result<T, EnvelopeError> {
        if !self.success {
            let reason = self
                .message
                .or(self.error)
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(EnvelopeError::Unsuccessful(reason));
        }
        self.data.ok_or(EnvelopeError::MissingData)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PageMeta {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

string_id!(
    /// Identifier of a registered user.
    UserId
);
string_id!(ChallengeId);
string_id!(
    /// Identifier of a single evaluated prompt submission.
    AttemptId
);
