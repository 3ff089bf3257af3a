pub mod endpoints;
mod error;
pub mod grading;
mod macros;
pub mod repositories;

pub use crate::endpoints::{ApiResponse, Endpoint, Method, PageMeta, RequestData};
pub use crate::error::{EnvelopeError, ErrorBody};
use repositories::*;

/// Backend used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1";

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn auth() -> AuthRepository {
        AuthRepository::new()
    }

    pub fn challenges() -> ChallengeRepository {
        ChallengeRepository::new()
    }

    pub fn evaluations() -> EvaluationRepository {
        EvaluationRepository::new()
    }

    pub fn leaderboard() -> LeaderboardRepository {
        LeaderboardRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}
