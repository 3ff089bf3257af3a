use crate::endpoints::{
    AttemptId, ChallengeId, UserId,
    auth::{Login, Logout, Me, Refresh, Register},
    challenges::{
        CreateChallenge, DeleteChallenge, GetChallenge, GetChallengeStats, ListChallenges,
        NewChallenge, UpdateChallenge,
    },
    evaluations::{Evaluate, GetAttempt, ListMyAttempts},
    leaderboard::{ChallengeLeaderboard, GlobalLeaderboard, MyRank},
    users::{DeleteUser, ListUsers},
};

pub struct AuthRepository;

impl AuthRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn register(
        &self,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Register {
        Register::new(username, email, password)
    }

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) -> Login {
        Login::new(email, password)
    }

    pub fn logout(&self) -> Logout {
        Logout
    }

    pub fn me(&self) -> Me {
        Me
    }

    pub fn refresh(&self, refresh_token: impl Into<String>) -> Refresh {
        Refresh::new(refresh_token)
    }
}

pub struct ChallengeRepository;

impl ChallengeRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListChallenges {
        ListChallenges::default()
    }

    pub fn get(&self, id: impl Into<ChallengeId>) -> GetChallenge {
        GetChallenge::new(id.into())
    }

    pub fn stats(&self, id: impl Into<ChallengeId>) -> GetChallengeStats {
        GetChallengeStats::new(id.into())
    }

    pub fn create(&self, challenge: NewChallenge) -> CreateChallenge {
        CreateChallenge::new(challenge)
    }

    pub fn update(&self, id: impl Into<ChallengeId>) -> UpdateChallenge {
        UpdateChallenge::new(id.into())
    }

    pub fn delete(&self, id: impl Into<ChallengeId>) -> DeleteChallenge {
        DeleteChallenge::new(id.into())
    }
}

pub struct EvaluationRepository;

impl EvaluationRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn evaluate(
        &self,
        challenge_id: impl Into<ChallengeId>,
        prompt_text: impl Into<String>,
    ) -> Evaluate {
        Evaluate::new(challenge_id.into(), prompt_text)
    }

    pub fn my_attempts(&self) -> ListMyAttempts {
        ListMyAttempts::default()
    }

    pub fn attempt(&self, id: impl Into<AttemptId>) -> GetAttempt {
        GetAttempt::new(id.into())
    }
}

pub struct LeaderboardRepository;

impl LeaderboardRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn global(&self) -> GlobalLeaderboard {
        GlobalLeaderboard
    }

    pub fn my_rank(&self) -> MyRank {
        MyRank
    }

    pub fn challenge(&self, challenge_id: impl Into<ChallengeId>) -> ChallengeLeaderboard {
        ChallengeLeaderboard::new(challenge_id.into())
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListUsers {
        ListUsers
    }

    pub fn delete(&self, id: impl Into<UserId>) -> DeleteUser {
        DeleteUser::new(id.into())
    }
}
