use super::{ApiResponse, AttemptId, ChallengeId, Endpoint, Method, RequestData, UserId};
use crate::grading::{Grade, RubricDimension};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorType {
    Ai,
    Heuristic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub total_score: f64,
    pub grade: Grade,
    pub clarity_score: f64,
    pub specificity_score: f64,
    pub context_score: f64,
    pub structure_score: f64,
    pub completeness_score: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    pub evaluator_type: EvaluatorType,
    pub word_count: u32,
}

impl EvaluationResult {
    pub fn score(&self, dimension: RubricDimension) -> f64 {
        match dimension {
            RubricDimension::Clarity => self.clarity_score,
            RubricDimension::Specificity => self.specificity_score,
            RubricDimension::Context => self.context_score,
            RubricDimension::Structure => self.structure_score,
            RubricDimension::Completeness => self.completeness_score,
        }
    }

    /// Per-dimension scores in rubric order.
    pub fn breakdown(&self) -> [(RubricDimension, f64); 5] {
        RubricDimension::ALL.map(|d| (d, self.score(d)))
    }
}

/// A stored submission together with its evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: AttemptId,
    pub user_id: UserId,
    pub challenge_id: ChallengeId,
    pub prompt_text: String,
    #[serde(flatten)]
    pub result: EvaluationResult,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub attempt_id: AttemptId,
    pub result: EvaluationResult,
}

// Requests

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluate {
    challenge_id: ChallengeId,
    prompt_text: String,
}

impl Evaluate {
    pub fn new(challenge_id: ChallengeId, prompt_text: impl Into<String>) -> Self {
        Self {
            challenge_id,
            prompt_text: prompt_text.into(),
        }
    }
}

impl Endpoint for Evaluate {
    type Data = Self;
    type Response = ApiResponse<EvaluateResponse>;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/evaluate".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListMyAttempts {
    page: u32,
    limit: u32,
}

impl Default for ListMyAttempts {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl ListMyAttempts {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(page: u32);
    setter!(limit: u32);
}

impl Endpoint for ListMyAttempts {
    type Data = Self;
    type Response = ApiResponse<Vec<Attempt>>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/evaluate/my-attempts".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetAttempt {
    id: AttemptId,
}

impl GetAttempt {
    pub fn new(id: AttemptId) -> Self {
        Self { id }
    }
}

impl Endpoint for GetAttempt {
    type Data = ();
    type Response = ApiResponse<Attempt>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/evaluate/my-attempts/{}", self.id).into()
    }
}
