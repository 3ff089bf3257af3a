use super::{ApiResponse, Endpoint, Method, RequestData, UserId};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// The authenticated account as the backend reports it. Cached client side
/// as the session identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub total_attempts: u32,
    #[serde(default)]
    pub best_score: f64,
    #[serde(default)]
    pub average_score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

// Requests

#[derive(Debug, Serialize)]
pub struct Register {
    username: String,
    email: String,
    #[serde(serialize_with = "expose")]
    password: SecretString,
}

impl Register {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Endpoint for Register {
    type Data = Self;
    type Response = ApiResponse<AuthResponse>;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/register".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Serialize)]
pub struct Login {
    email: String,
    #[serde(serialize_with = "expose")]
    password: SecretString,
}

impl Login {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Endpoint for Login {
    type Data = Self;
    type Response = ApiResponse<AuthResponse>;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/login".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct Logout;

impl Endpoint for Logout {
    type Data = ();
    type Response = ApiResponse<serde_json::Value>;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/logout".into()
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct Me;

impl Endpoint for Me {
    type Data = ();
    type Response = ApiResponse<User>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/me".into()
    }
}

/// Mint a new token pair. Sent without a bearer credential.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Refresh {
    refresh_token: String,
}

impl Refresh {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
        }
    }
}

impl Endpoint for Refresh {
    type Data = Self;
    type Response = ApiResponse<TokenPair>;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/auth/refresh".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_body_exposes_password_only_on_the_wire() {
        let login = Login::new("ada@example.com", "hunter2");
        let json = serde_json::to_value(&login).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": "ada@example.com", "password": "hunter2"})
        );
        assert!(!format!("{:?}", login).contains("hunter2"));
    }

    #[test]
    fn refresh_body_is_camel_case() {
        let json = serde_json::to_value(Refresh::new("r-1")).unwrap();
        assert_eq!(json, serde_json::json!({"refreshToken": "r-1"}));
    }

    #[test]
    fn auth_response_flattens_tokens() {
        let json = r#"{
            "user": {
                "id": "u1",
                "username": "ada",
                "email": "ada@example.com",
                "role": "admin",
                "totalAttempts": 4,
                "bestScore": 8.5,
                "averageScore": 6.25,
                "createdAt": "2025-01-02T03:04:05.000Z",
                "updatedAt": "2025-01-02T03:04:05.000Z"
            },
            "accessToken": "a-1",
            "refreshToken": "r-1"
        }"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(resp.user.is_admin());
        assert_eq!(resp.user.total_attempts, 4);
        assert_eq!(resp.tokens.access_token, "a-1");
        assert_eq!(resp.tokens.refresh_token, "r-1");
    }

    #[test]
    fn user_stats_default_when_absent() {
        let json = r#"{
            "id": "u2",
            "username": "bob",
            "email": "bob@example.com",
            "role": "user",
            "createdAt": "2025-01-02T03:04:05Z",
            "updatedAt": "2025-01-02T03:04:05Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.total_attempts, 0);
        assert_eq!(user.best_score, 0.0);
    }
}
