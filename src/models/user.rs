//! Dashboard user model and login payloads.

use serde::{Deserialize, Serialize};

/// A dashboard login. Only the bootstrap admin is ever created.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Request body for POST /api/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User fields returned alongside the bearer token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
}

/// Response body for POST /api/login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}
