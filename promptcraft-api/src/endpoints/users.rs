use super::auth::User;
use super::{ApiResponse, Endpoint, Method, UserId};
use std::borrow::Cow;

/// Admin only.
#[derive(Default, Debug, Clone)]
pub struct ListUsers;

impl Endpoint for ListUsers {
    type Data = ();
    type Response = ApiResponse<Vec<User>>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users".into()
    }
}

/// Admin only.
#[derive(Debug, Clone)]
pub struct DeleteUser {
    id: UserId,
}

impl DeleteUser {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

impl Endpoint for DeleteUser {
    type Data = ();
    type Response = ApiResponse<serde_json::Value>;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/users/{}", self.id).into()
    }
}
