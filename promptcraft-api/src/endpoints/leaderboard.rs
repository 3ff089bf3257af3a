use super::{ApiResponse, ChallengeId, Endpoint, UserId};
use crate::grading::Grade;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: UserId,
    pub username: String,
    pub best_score: f64,
    pub total_attempts: u32,
    pub average_score: f64,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeLeaderboardEntry {
    pub id: UserId,
    pub username: String,
    pub total_score: f64,
    pub grade: Grade,
    pub created_at: DateTime<Utc>,
    pub rank: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRank {
    pub rank: u32,
    pub total: u32,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct GlobalLeaderboard;

impl Endpoint for GlobalLeaderboard {
    type Data = ();
    type Response = ApiResponse<Vec<LeaderboardEntry>>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/leaderboard".into()
    }
}

#[derive(Default, Debug, Clone)]
pub struct MyRank;

impl Endpoint for MyRank {
    type Data = ();
    type Response = ApiResponse<UserRank>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/leaderboard/my-rank".into()
    }
}

#[derive(Debug, Clone)]
pub struct ChallengeLeaderboard {
    challenge_id: ChallengeId,
}

impl ChallengeLeaderboard {
    pub fn new(challenge_id: ChallengeId) -> Self {
        Self { challenge_id }
    }
}

impl Endpoint for ChallengeLeaderboard {
    type Data = ();
    type Response = ApiResponse<Vec<ChallengeLeaderboardEntry>>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/leaderboard/challenge/{}", self.challenge_id).into()
    }
}
