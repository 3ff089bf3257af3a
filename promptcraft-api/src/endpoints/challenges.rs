use super::{ApiResponse, ChallengeId, Endpoint, Method, RequestData};
use crate::grading::Grade;
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Display;

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "UI/UX Design")]
    UiUxDesign,
    Backend,
    #[serde(rename = "AI Prompting")]
    AiPrompting,
    Database,
    DevOps,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(untagged)]
    Other(String),
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UiUxDesign => f.write_str("UI/UX Design"),
            Self::Backend => f.write_str("Backend"),
            Self::AiPrompting => f.write_str("AI Prompting"),
            Self::Database => f.write_str("Database"),
            Self::DevOps => f.write_str("DevOps"),
            Self::DataScience => f.write_str("Data Science"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "UI/UX Design" => Self::UiUxDesign,
            "Backend" => Self::Backend,
            "AI Prompting" => Self::AiPrompting,
            "Database" => Self::Database,
            "DevOps" => Self::DevOps,
            "Data Science" => Self::DataScience,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    #[serde(untagged)]
    Other(String),
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => f.write_str("Beginner"),
            Self::Intermediate => f.write_str("Intermediate"),
            Self::Advanced => f.write_str("Advanced"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Difficulty {
    fn from(s: &str) -> Self {
        match s {
            "Beginner" => Self::Beginner,
            "Intermediate" => Self::Intermediate,
            "Advanced" => Self::Advanced,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: ChallengeId,
    pub title: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub instruction: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub example_prompt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub estimated_minutes: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeStats {
    pub total_attempts: u32,
    pub average_score: f64,
    pub best_score: f64,
    pub grade_distribution: GradeDistribution,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    #[serde(rename = "S", default)]
    pub s: u32,
    #[serde(rename = "A", default)]
    pub a: u32,
    #[serde(rename = "B", default)]
    pub b: u32,
    #[serde(rename = "C", default)]
    pub c: u32,
    #[serde(rename = "D", default)]
    pub d: u32,
    #[serde(rename = "F", default)]
    pub f: u32,
}

impl GradeDistribution {
    pub fn count(&self, grade: Grade) -> u32 {
        match grade {
            Grade::S => self.s,
            Grade::A => self.a,
            Grade::B => self.b,
            Grade::C => self.c,
            Grade::D => self.d,
            Grade::F => self.f,
        }
    }

    pub fn total(&self) -> u32 {
        Grade::ALL.iter().map(|g| self.count(*g)).sum()
    }
}

/// Fields of a challenge an admin supplies on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChallenge {
    pub title: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub instruction: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub example_prompt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub estimated_minutes: u32,
    pub is_active: bool,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListChallenges {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
}

impl ListChallenges {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt page: u32);
    setter!(opt limit: u32);
    setter!(opt category: Category);
    setter!(opt difficulty: Difficulty);
}

impl Endpoint for ListChallenges {
    type Data = Self;
    type Response = ApiResponse<Vec<Challenge>>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/challenges".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetChallenge {
    id: ChallengeId,
}

impl GetChallenge {
    pub fn new(id: ChallengeId) -> Self {
        Self { id }
    }
}

impl Endpoint for GetChallenge {
    type Data = ();
    type Response = ApiResponse<Challenge>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/challenges/{}", self.id).into()
    }
}

#[derive(Debug, Clone)]
pub struct GetChallengeStats {
    id: ChallengeId,
}

impl GetChallengeStats {
    pub fn new(id: ChallengeId) -> Self {
        Self { id }
    }
}

impl Endpoint for GetChallengeStats {
    type Data = ();
    type Response = ApiResponse<ChallengeStats>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/challenges/{}/stats", self.id).into()
    }
}

#[derive(Debug, Clone)]
pub struct CreateChallenge {
    challenge: NewChallenge,
}

impl CreateChallenge {
    pub fn new(challenge: NewChallenge) -> Self {
        Self { challenge }
    }
}

impl Endpoint for CreateChallenge {
    type Data = NewChallenge;
    type Response = ApiResponse<Challenge>;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/challenges".into()
    }

    fn data(&self) -> RequestData<&NewChallenge> {
        RequestData::Json(&self.challenge)
    }
}

/// Partial update; only the fields that were set are sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChallenge {
    #[serde(skip)]
    id: ChallengeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tips: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

impl UpdateChallenge {
    pub fn new(id: ChallengeId) -> Self {
        Self {
            id,
            title: None,
            category: None,
            difficulty: None,
            instruction: None,
            tips: None,
            example_prompt: None,
            tags: None,
            estimated_minutes: None,
            is_active: None,
        }
    }

    setter!(opt title: String);
    setter!(opt category: Category);
    setter!(opt difficulty: Difficulty);
    setter!(opt instruction: String);
    setter!(opt tips: Vec<String>);
    setter!(opt example_prompt: String);
    setter!(opt tags: Vec<String>);
    setter!(opt estimated_minutes: u32);
    setter!(opt is_active: bool);
}

impl Endpoint for UpdateChallenge {
    type Data = Self;
    type Response = ApiResponse<Challenge>;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/challenges/{}", self.id).into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteChallenge {
    id: ChallengeId,
}

impl DeleteChallenge {
    pub fn new(id: ChallengeId) -> Self {
        Self { id }
    }
}

impl Endpoint for DeleteChallenge {
    type Data = ();
    type Response = ApiResponse<serde_json::Value>;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/challenges/{}", self.id).into()
    }
}
