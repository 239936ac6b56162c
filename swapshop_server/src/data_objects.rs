use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use swapshop_engine::db_types::{AuthToken, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

#[derive(Clone, Deserialize)]
pub struct LoginParams {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginParams").field("email", &self.email).field("password", &"****").finish()
    }
}

/// The response body for a successful registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl AuthResponse {
    pub fn new(user: User, token: AuthToken) -> Self {
        Self { token: token.token, user }
    }
}
