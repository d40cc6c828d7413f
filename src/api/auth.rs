//! Login endpoint.

use axum::{extract::State, Json};

use crate::auth;
use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse, UserInfo};
use crate::AppState;

/// POST /api/login - Authenticate a dashboard user and issue a bearer token.
///
/// Unknown email and wrong password produce the same message.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .repo
        .find_user_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::Validation("Invalid email or password".to_string()))?;

    if !auth::verify_password(&request.password, &user.password_hash) {
        return Err(AppError::Validation(
            "Invalid email or password".to_string(),
        ));
    }

    let token = auth::issue_token(&user, &state.config.jwt_secret)?;

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user.id,
            email: user.email,
            is_admin: user.is_admin,
        },
    }))
}
